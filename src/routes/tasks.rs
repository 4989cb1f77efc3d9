use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::TaskStatus;
use crate::dto::ListQuery;
use crate::forms::tasks::AddTaskForm;
use crate::models::auth::AuthenticatedUser;
use crate::routes::{base_context, finish_mutation, render_list};
use crate::services::tasks as tasks_service;
use crate::store::Store;

#[get("/tasks")]
pub async fn show_tasks(
    params: web::Query<ListQuery>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "tasks", &store);
    context.insert("statuses", &TaskStatus::ALL);
    let result = tasks_service::load_tasks_page(&store, &user, params.into_inner());
    render_list(&tera, context, "tasks/index.html", result)
}

#[post("/tasks/add")]
pub async fn add_task(
    user: AuthenticatedUser,
    store: web::Data<Store>,
    web::Form(form): web::Form<AddTaskForm>,
) -> impl Responder {
    let result = tasks_service::add_task(&store, &user, form);
    finish_mutation(result, "Task added.", "/tasks")
}

#[post("/tasks/{id}/toggle")]
pub async fn toggle_task(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = tasks_service::toggle_task(&store, &user, &id);
    finish_mutation(result, "Task updated.", "/tasks")
}

#[post("/tasks/{id}/delete")]
pub async fn delete_task(
    id: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<Store>,
) -> impl Responder {
    let result = tasks_service::delete_task(&store, &user, &id);
    finish_mutation(result, "Task deleted.", "/tasks")
}
