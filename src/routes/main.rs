use actix_web::{HttpResponse, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::section::Section;
use crate::dto::main::PlaceholderPageData;
use crate::routes::{base_context, render_template};

/// Renders the static page of a section without functionality.
pub fn show_placeholder(
    section: Section,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    let Some(text) = section.placeholder() else {
        return HttpResponse::NotFound().finish();
    };

    let data = PlaceholderPageData { section, text };
    let mut context = base_context(flash_messages, section);
    context.insert("page", &data);

    render_template(tera, "main/placeholder.html", &context)
}

/// Registers `GET` for every section that only has placeholder copy,
/// the dashboard at `/` included.
pub fn configure_placeholders(cfg: &mut web::ServiceConfig) {
    for section in Section::ALL {
        if section.placeholder().is_none() {
            continue;
        }
        cfg.route(
            section.path(),
            web::get().to(
                move |flash_messages: IncomingFlashMessages, tera: web::Data<Tera>| async move {
                    show_placeholder(section, &flash_messages, &tera)
                },
            ),
        );
    }
}
