//! HTTP handlers for the four boundary operations.
//!
//! Handlers validate the request shape, convert it into domain types and
//! dispatch to the service layer; they perform no business logic.

use actix_web::{HttpResponse, Responder, post, web};
use validator::Validate;

use crate::forms::api::{BestCombinationForm, CompareForm, FilterForm, SearchForm};
use crate::models::config::ServerConfig;
use crate::repository::csv::CsvCatalog;
use crate::routes::error_response;
use crate::services::combination::OptimizerRequest;
use crate::services::{ServiceError, combination, compare, filter, search};

#[post("/search")]
pub async fn api_search(
    form: web::Json<SearchForm>,
    catalog: web::Data<CsvCatalog>,
) -> impl Responder {
    let items = match form.requested_items() {
        Ok(items) => items,
        Err(e) => return error_response(&ServiceError::from(e)),
    };
    match search::search(&items, catalog.get_ref()) {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(e) => error_response(&e),
    }
}

#[post("/filter")]
pub async fn api_filter(
    form: web::Json<FilterForm>,
    catalog: web::Data<CsvCatalog>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return error_response(&ServiceError::Validation(e.to_string()));
    }
    let form = form.into_inner();
    let (items, options) = match form
        .ensure_sources()
        .and_then(|_| form.ensure_packages())
        .and_then(|_| Ok((form.requested_items()?, form.options()?)))
    {
        Ok(parsed) => parsed,
        Err(e) => return error_response(&ServiceError::from(e)),
    };
    match filter::filter_request(form.packages, &items, &options, catalog.get_ref()) {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(e) => error_response(&e),
    }
}

#[post("/compare")]
pub async fn api_compare(
    form: web::Json<CompareForm>,
    catalog: web::Data<CsvCatalog>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return error_response(&ServiceError::Validation(e.to_string()));
    }
    let (package_ids, items) = match form
        .package_ids()
        .and_then(|ids| Ok((ids, form.requested_items()?)))
    {
        Ok(parsed) => parsed,
        Err(e) => return error_response(&ServiceError::from(e)),
    };
    match compare::compare(&package_ids, &items, catalog.get_ref()) {
        Ok(combination) => HttpResponse::Ok().json(combination),
        Err(e) => error_response(&e),
    }
}

#[post("/best-combination")]
pub async fn api_best_combination(
    form: web::Json<BestCombinationForm>,
    catalog: web::Data<CsvCatalog>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return error_response(&ServiceError::Validation(e.to_string()));
    }
    let optimizer = &config.optimizer;
    let parsed = form.ensure_packages().and_then(|_| {
        Ok((form.requested_items()?, form.max_price()?, form.restrict_to()?))
    });
    let (items, max_price, restrict_to) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return error_response(&ServiceError::from(e)),
    };
    let request = OptimizerRequest {
        max_size: form
            .max_size
            .unwrap_or(optimizer.max_combination_size)
            .min(optimizer.max_combination_size),
        max_price,
        restrict_to,
    };
    match combination::best_combination(&items, &request, optimizer, catalog.get_ref()) {
        Ok(combination) => HttpResponse::Ok().json(combination),
        Err(e) => error_response(&e),
    }
}
