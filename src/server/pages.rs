use askama::Template;
use axum::{
    extract::{Extension, Form, Path, Query},
    response::Response,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    controller::{Action, Controller},
    presenter::View,
    server::{dispatch, Accept, ServerError},
    storage::Storage,
    validator::Field,
};

#[derive(Template, Serialize)]
#[template(path = "index.html")]
pub struct IndexPage {
    view: View,
}

#[derive(Deserialize)]
pub struct IndexParams {
    search: Option<String>,
}

pub async fn index<S: Storage + 'static>(
    Query(params): Query<IndexParams>,
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    let update = dispatch(controller, params.search.map(Action::Search))?;

    Ok(accept.into_repsonse(IndexPage { view: update.view }))
}

#[derive(Deserialize)]
pub struct ContactForm {
    name: String,
    phone: String,
    #[serde(default)]
    email: String,
}

pub async fn submit<S: Storage + 'static>(
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
    Form(form): Form<ContactForm>,
) -> Result<Response, ServerError> {
    let input = |field, value| Action::Input { field, value };

    let update = dispatch(
        controller,
        [
            input(Field::Name, form.name),
            input(Field::Phone, form.phone),
            input(Field::Email, form.email),
            Action::Submit,
        ],
    )?;

    Ok(accept.after_action(IndexPage { view: update.view }))
}

pub async fn edit<S: Storage + 'static>(
    Path(id): Path<String>,
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::RequestEdit(id))
}

pub async fn delete<S: Storage + 'static>(
    Path(id): Path<String>,
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::RequestDelete(id))
}

pub async fn cancel<S: Storage + 'static>(
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::Cancel)
}

pub async fn confirm<S: Storage + 'static>(
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::ConfirmDelete)
}

pub async fn decline<S: Storage + 'static>(
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::DeclineDelete)
}

pub async fn theme<S: Storage + 'static>(
    accept: Accept,
    Extension(controller): Extension<&'static Mutex<Controller<S>>>,
) -> Result<Response, ServerError> {
    act(accept, controller, Action::ToggleTheme)
}

fn act<S: Storage + 'static>(
    accept: Accept,
    controller: &'static Mutex<Controller<S>>,
    action: Action,
) -> Result<Response, ServerError> {
    let update = dispatch(controller, [action])?;

    Ok(accept.after_action(IndexPage { view: update.view }))
}
