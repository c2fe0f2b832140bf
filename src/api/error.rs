use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;

#[derive(Debug, Clone)]
pub enum Error {
    ConnectionError(String),
    AuthenticationError(String),
    DevicesError(String),
    InvalidResponse(String, String),
    FormatError,
    InternalError,
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::AuthenticationError(s) => {
                let error = format!("<html><body><h3>403 Forbidden</h3>Downstream API rejected the auth token: <code>{}</code></body></html>", s);
                Response::build()
                    .status(Status::Forbidden)
                    .sized_body(error.len(), Cursor::new(error))
                    .header(ContentType::new("text", "html"))
                    .ok()
            }
            Error::ConnectionError(s) => {
                let error = format!("<html><body><h3>502 Bad Gateway</h3>Error while contacting downstream API: <code>{}</code></body></html>", s);
                Response::build()
                    .status(Status::BadGateway)
                    .sized_body(error.len(), Cursor::new(error))
                    .header(ContentType::new("text", "html"))
                    .ok()
            }
            _ => {
                let error = format!(
                    "<html><body><h3>Unknown exception</h3><code>{:?}</code></body></html>",
                    self
                );
                Response::build()
                    .status(Status::InternalServerError)
                    .sized_body(error.len(), Cursor::new(error))
                    .header(ContentType::new("text", "html"))
                    .ok()
            }
        }
    }
}
