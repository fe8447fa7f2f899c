use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::section::Section;
use crate::dto::fleet::{FLEET_PATH, fleet_url};
use crate::dto::vehicle::detail_url;
use crate::forms::fleet::parse_query_string;
use crate::forms::vehicle::{DeleteVehicleForm, VehicleForm};
use crate::repository::DashboardRepository;
use crate::routes::{base_context, redirect, render_template, render_template_with_status};
use crate::services::ServiceError;
use crate::services::vehicle::{self as vehicle_service, parse_vehicle_id};

/// Renders the "not found or failed to load" page.
fn vehicle_missing(
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
    status: StatusCode,
) -> HttpResponse {
    let context = base_context(flash_messages, Section::Fleet);
    render_template_with_status(tera, "vehicle/missing.html", &context, status)
}

#[get("/fleet/{vehicle_id}")]
pub async fn show_vehicle(
    vehicle_id: web::Path<String>,
    repo: web::Data<DashboardRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match vehicle_service::load_vehicle_page(repo.get_ref(), &vehicle_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Section::Fleet);
            context.insert("vehicle", &data.vehicle);

            render_template(&tera, "vehicle/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            vehicle_missing(&flash_messages, &tera, StatusCode::NOT_FOUND)
        }
        Err(err) => {
            log::error!("Failed to show vehicle: {err}");
            vehicle_missing(&flash_messages, &tera, StatusCode::BAD_GATEWAY)
        }
    }
}

#[get("/fleet/{vehicle_id}/edit")]
pub async fn edit_vehicle(
    vehicle_id: web::Path<String>,
    repo: web::Data<DashboardRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match vehicle_service::load_edit_page(repo.get_ref(), &vehicle_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Section::Fleet);
            context.insert("page", &data);

            render_template(&tera, "vehicle/edit.html", &context)
        }
        Err(ServiceError::NotFound) => {
            vehicle_missing(&flash_messages, &tera, StatusCode::NOT_FOUND)
        }
        Err(err) => {
            log::error!("Failed to load the edit form: {err}");
            vehicle_missing(&flash_messages, &tera, StatusCode::BAD_GATEWAY)
        }
    }
}

#[post("/fleet/{vehicle_id}/edit")]
pub async fn save_vehicle(
    vehicle_id: web::Path<String>,
    repo: web::Data<DashboardRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<VehicleForm>,
) -> impl Responder {
    let Ok(id) = parse_vehicle_id(&vehicle_id) else {
        return vehicle_missing(&flash_messages, &tera, StatusCode::NOT_FOUND);
    };

    match vehicle_service::update_vehicle(repo.get_ref(), &vehicle_id, form.clone()).await {
        Ok(_) => {
            FlashMessage::success("Автомобиль обновлён.").send();
            redirect(&detail_url(id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Автомобиль не найден.").send();
            redirect(FLEET_PATH)
        }
        Err(err) => {
            let data = vehicle_service::update_failed_page(id, form, &err);

            let mut context = base_context(&flash_messages, Section::Fleet);
            context.insert("page", &data);

            render_template(&tera, "vehicle/edit.html", &context)
        }
    }
}

#[post("/fleet/{vehicle_id}/delete")]
pub async fn delete_vehicle(
    vehicle_id: web::Path<String>,
    repo: web::Data<DashboardRepository>,
    web::Form(form): web::Form<DeleteVehicleForm>,
) -> impl Responder {
    // Table buttons return to their list, the details page returns to /fleet.
    let list_url = match form.return_query.as_deref() {
        Some(query) => fleet_url(&parse_query_string(query)),
        None => FLEET_PATH.to_string(),
    };

    match vehicle_service::delete_vehicle(repo.get_ref(), &vehicle_id).await {
        Ok(()) => {
            FlashMessage::success("Автомобиль удалён.").send();
            redirect(&list_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Автомобиль не найден.").send();
            redirect(&list_url)
        }
        Err(err) => {
            log::error!("Failed to delete vehicle: {err}");
            FlashMessage::error("Ошибка при удалении автомобиля").send();
            match (form.return_query, parse_vehicle_id(&vehicle_id)) {
                (None, Ok(id)) => redirect(&detail_url(id)),
                _ => redirect(&list_url),
            }
        }
    }
}
