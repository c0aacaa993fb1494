pub mod pages;

use std::convert::Infallible;

use anyhow::Error;
use askama::Template;
use axum::{
    async_trait,
    extract::{Extension, FromRequest, RequestParts},
    http::{header::ACCEPT, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::{spawn, time::sleep};

use crate::{
    controller::{Action, Controller, Update},
    message::ScheduledClear,
    storage::Storage,
};

pub fn router<S>(controller: &'static Mutex<Controller<S>>) -> Router
where
    S: Storage + 'static,
{
    Router::new()
        .route("/", get(pages::index::<S>))
        .route("/contacts", post(pages::submit::<S>))
        .route("/contacts/:id/edit", post(pages::edit::<S>))
        .route("/contacts/:id/delete", post(pages::delete::<S>))
        .route("/cancel", post(pages::cancel::<S>))
        .route("/confirm", post(pages::confirm::<S>))
        .route("/decline", post(pages::decline::<S>))
        .route("/theme", post(pages::theme::<S>))
        .layer(Extension(controller))
}

#[derive(Debug, Clone, Copy)]
pub enum Accept {
    Unspecified,
    Html,
    Json,
}

impl Accept {
    pub fn into_repsonse<P>(self, page: P) -> Response
    where
        P: Template + Serialize,
    {
        match self {
            Accept::Unspecified | Accept::Html => Html(page.render().unwrap()).into_response(),
            Accept::Json => Json(page).into_response(),
        }
    }

    /// Browsers are sent back to the page while JSON clients get the new view directly.
    pub fn after_action<P>(self, page: P) -> Response
    where
        P: Template + Serialize,
    {
        match self {
            Accept::Unspecified | Accept::Html => Redirect::to("/").into_response(),
            Accept::Json => Json(page).into_response(),
        }
    }
}

#[async_trait]
impl<B> FromRequest<B> for Accept
where
    B: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        if let Some(accept) = req
            .headers()
            .get(ACCEPT)
            .and_then(|header| header.to_str().ok())
        {
            if accept.contains("text/html") {
                return Ok(Self::Html);
            } else if accept.contains("application/json") {
                return Ok(Self::Json);
            }
        }

        Ok(Self::Unspecified)
    }
}

pub struct ServerError(Error);

impl<E> From<E> for ServerError
where
    Error: From<E>,
{
    fn from(err: E) -> Self {
        Self(Error::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{:#}", self.0);

        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

/// Runs the actions of a single UI event to completion and arms the message timer if requested.
pub fn dispatch<S, A>(
    controller: &'static Mutex<Controller<S>>,
    actions: A,
) -> Result<Update, Error>
where
    S: Storage + 'static,
    A: IntoIterator<Item = Action>,
{
    let mut controller1 = controller.lock();
    let mut update = None;

    for action in actions {
        let update1 = controller1.dispatch(action)?;

        if let Some(clear) = update1.clear {
            schedule_clear(controller, clear);
        }

        update = Some(update1);
    }

    let update = update.unwrap_or_else(|| Update {
        view: controller1.view(),
        clear: None,
    });

    Ok(update)
}

fn schedule_clear<S>(controller: &'static Mutex<Controller<S>>, clear: ScheduledClear)
where
    S: Storage + 'static,
{
    spawn(async move {
        sleep(clear.after).await;

        if let Err(err) = controller
            .lock()
            .dispatch(Action::ClearMessage(clear.version))
        {
            tracing::warn!("Failed to clear message: {:#}", err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use tokio::time::pause;

    use crate::{config::Config, storage::MemoryStorage, validator::Field};

    fn input(field: Field, value: &str) -> Action {
        Action::Input {
            field,
            value: value.to_owned(),
        }
    }

    fn submit(name: &str) -> [Action; 4] {
        [
            input(Field::Name, name),
            input(Field::Phone, "555 0100 100"),
            input(Field::Email, ""),
            Action::Submit,
        ]
    }

    #[tokio::test]
    async fn message_is_cleared_after_its_duration() {
        pause();

        let controller = &*Box::leak(Box::new(Mutex::new(Controller::open(
            MemoryStorage::default(),
            &Config::default(),
        ))));

        let update = dispatch(controller, submit("Bob")).unwrap();
        assert_eq!(update.view.message, Some("Contact added."));

        sleep(Duration::from_millis(1500)).await;
        dispatch(controller, submit("Ann")).unwrap();

        // The first timer fires but must not clear the newer message.
        sleep(Duration::from_millis(600)).await;
        assert_eq!(controller.lock().message(), Some("Contact added."));

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(controller.lock().message(), None);
    }

    #[tokio::test]
    async fn no_actions_only_renders() {
        let controller = &*Box::leak(Box::new(Mutex::new(Controller::open(
            MemoryStorage::default(),
            &Config::default(),
        ))));

        let update = dispatch(controller, []).unwrap();

        assert!(update.view.list.empty);
        assert_eq!(update.clear, None);
    }
}
