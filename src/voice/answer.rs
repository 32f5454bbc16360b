use crate::{
    ncco::{Connect, Ncco},
    secrets::Secrets,
};
use axum::{extract::Query, Extension, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnswerQuery {
    to: Option<String>,
}

/// Tells the platform to bridge the inbound call to the `to` number. The
/// number is passed through untouched; rejecting a bad or missing one is
/// left to the platform.
pub async fn answer_handler(
    secrets: Extension<Secrets>,
    Query(query): Query<AnswerQuery>,
) -> Json<Ncco> {
    log::debug!("Answering call to {:?}", query.to);

    let mut ncco = Ncco::new();
    ncco.add(Connect::phone(
        secrets.nexmo_from_number.as_deref(),
        query.to.as_deref(),
    ));

    Json(ncco)
}
