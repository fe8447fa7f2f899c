use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::section::Section;
use crate::dto::fleet::fleet_url;
use crate::forms::fleet::{AddVehicleForm, FleetQuery, parse_query_string};
use crate::repository::DashboardRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::fleet as fleet_service;

#[get("/fleet")]
pub async fn show_fleet(
    query: web::Query<FleetQuery>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = fleet_service::load_fleet_page(query.into_inner());

    let mut context = base_context(&flash_messages, Section::Fleet);
    context.insert("page", &data);

    render_template(&tera, "fleet/index.html", &context)
}

/// Table fragment requested by the fleet page once it is shown.
#[get("/fleet/table")]
pub async fn fleet_table(
    query: web::Query<FleetQuery>,
    repo: web::Data<DashboardRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    match fleet_service::load_fleet_table(repo.get_ref(), query.into_inner()).await {
        Ok(table) => {
            context.insert("table", &table);
        }
        Err(err) => {
            context.insert("error", &fleet_service::load_error_message(&err));
        }
    }

    render_template(&tera, "fleet/_table.html", &context)
}

#[post("/fleet/add")]
pub async fn add_vehicle(
    repo: web::Data<DashboardRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddVehicleForm>,
) -> impl Responder {
    let AddVehicleForm {
        return_query,
        vehicle,
    } = form;

    match fleet_service::create_vehicle(repo.get_ref(), vehicle.clone()).await {
        Ok(_) => {
            FlashMessage::success("Автомобиль добавлен.").send();
            redirect(&fleet_url(&parse_query_string(&return_query)))
        }
        Err(err) => {
            let data = fleet_service::creation_failed_page(&return_query, vehicle, &err);

            let mut context = base_context(&flash_messages, Section::Fleet);
            context.insert("page", &data);

            render_template(&tera, "fleet/index.html", &context)
        }
    }
}
