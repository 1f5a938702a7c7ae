use crate::configuration::Configuration;
use crate::web_app_data::AppData;
use gtfs_structure::{Gtfs, Place, Stop, DEFAULT_RADIUS_METERS};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{Json, Response};
use warp::{Filter, Rejection, Reply};

/// Error reply: a status code and a `{"error": message}` body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<gtfs_structure::Error> for ApiError {
    fn from(e: gtfs_structure::Error) -> Self {
        if e.is_not_found() {
            ApiError::new(StatusCode::NOT_FOUND, e.to_string())
        } else {
            error!("unexpected dataset error: {}", e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        let body = warp::reply::json(&json!({ "error": self.message }));
        warp::reply::with_status(body, self.status).into_response()
    }
}

fn respond(result: Result<Json, ApiError>) -> Response {
    match result {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize, Default)]
pub struct LocationQuery {
    lat: Option<String>,
    lon: Option<String>,
    radius: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct StopQuery {
    stop_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct RouteQuery {
    route_id: Option<String>,
}

struct Location {
    latitude: f64,
    longitude: f64,
    radius: f64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    non_empty(value).ok_or_else(|| ApiError::bad_request(format!("{name} parameter required")))
}

fn parse_param(name: &str, value: &str) -> Result<f64, ApiError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::bad_request(format!("invalid {name} parameter")))
}

impl LocationQuery {
    /// None unless both `lat` and `lon` are given
    fn location(&self) -> Result<Option<Location>, ApiError> {
        let (lat, lon) = match (non_empty(&self.lat), non_empty(&self.lon)) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Ok(None),
        };
        let latitude = parse_param("lat", lat)?;
        let longitude = parse_param("lon", lon)?;
        let radius = match non_empty(&self.radius) {
            Some(radius) => parse_param("radius", radius)?,
            None => DEFAULT_RADIUS_METERS,
        };
        Ok(Some(Location {
            latitude,
            longitude,
            radius,
        }))
    }
}

fn health() -> Response {
    warp::reply::json(&json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

fn list_stops(gtfs: &Gtfs, query: &LocationQuery) -> Result<Json, ApiError> {
    let stops: Vec<&Stop> = match query.location()? {
        Some(loc) => gtfs.nearby_stops(loc.latitude, loc.longitude, loc.radius),
        None => gtfs.stops().iter().collect(),
    };
    let count = stops.len();
    Ok(warp::reply::json(&json!({ "stops": stops, "count": count })))
}

fn nearest_stop(gtfs: &Gtfs, query: &LocationQuery) -> Result<Json, ApiError> {
    let loc = query
        .location()?
        .ok_or_else(|| ApiError::bad_request("lat and lon parameters required"))?;
    let (stop, distance) = gtfs
        .nearest_stop(loc.latitude, loc.longitude)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "no stop loaded"))?;
    Ok(warp::reply::json(&json!({ "stop": stop, "distance": distance })))
}

fn get_stop(gtfs: &Gtfs, query: &StopQuery) -> Result<Json, ApiError> {
    let stop = gtfs.get_stop(required(&query.stop_id, "stop_id")?)?;
    Ok(warp::reply::json(stop))
}

fn list_routes(gtfs: &Gtfs) -> Result<Json, ApiError> {
    let routes = gtfs.routes();
    Ok(warp::reply::json(&json!({ "routes": routes, "count": routes.len() })))
}

fn get_route(gtfs: &Gtfs, query: &RouteQuery) -> Result<Json, ApiError> {
    let route = gtfs.get_route(required(&query.route_id, "route_id")?)?;
    Ok(warp::reply::json(route))
}

fn route_shape(gtfs: &Gtfs, query: &RouteQuery) -> Result<Json, ApiError> {
    let route = gtfs.get_route(required(&query.route_id, "route_id")?)?;
    let points = gtfs.route_shape(&route.id);
    Ok(warp::reply::json(&json!({ "route_id": route.id, "points": points })))
}

fn list_places(gtfs: &Gtfs, query: &LocationQuery) -> Result<Json, ApiError> {
    let places: Vec<&Place> = match query.location()? {
        Some(loc) => gtfs.nearby_places(loc.latitude, loc.longitude, loc.radius),
        None => gtfs.places(),
    };
    let count = places.len();
    Ok(warp::reply::json(&json!({ "places": places, "count": count })))
}

async fn fetch_arrivals(ad: &AppData, query: &StopQuery) -> Result<Json, ApiError> {
    let stop = ad.gtfs.get_stop(required(&query.stop_id, "stop_id")?)?;
    let arrivals = ad
        .arrivals
        .fetch(&stop.id, stop.latitude, stop.longitude)
        .await
        .map_err(|e| {
            error!("fetching arrivals of stop {} failed: {:#}", stop.id, e);
            ApiError::new(StatusCode::BAD_GATEWAY, "failed to fetch arrivals")
        })?;
    Ok(warp::reply::json(&json!({
        "stop_id": stop.id,
        "stop_name": stop.name,
        "arrivals": arrivals,
    })))
}

async fn stop_arrivals(ad: Arc<AppData>, query: StopQuery) -> Result<Response, Infallible> {
    Ok(respond(fetch_arrivals(&ad, &query).await))
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let error = if err.is_not_found() {
        ApiError::new(StatusCode::NOT_FOUND, "not found")
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        ApiError::bad_request("invalid query string")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    } else {
        error!("unhandled rejection: {:?}", err);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    };
    Ok(error.into_response())
}

fn with_appdata(
    ad: Arc<AppData>,
) -> impl Filter<Extract = (Arc<AppData>,), Error = Infallible> + Clone {
    warp::any().map(move || ad.clone())
}

/// Every endpoint of the API, without CORS nor logging
pub fn routes(
    appdata: Arc<AppData>,
) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    let health = warp::path!("health").map(health);

    let stops = warp::path!("stops")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<LocationQuery>())
        .map(|ad: Arc<AppData>, q: LocationQuery| respond(list_stops(&ad.gtfs, &q)));

    let nearest = warp::path!("stops" / "nearest")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<LocationQuery>())
        .map(|ad: Arc<AppData>, q: LocationQuery| respond(nearest_stop(&ad.gtfs, &q)));

    let arrivals = warp::path!("stops" / "arrivals")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<StopQuery>())
        .and_then(stop_arrivals);

    let stop = warp::path!("stop")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<StopQuery>())
        .map(|ad: Arc<AppData>, q: StopQuery| respond(get_stop(&ad.gtfs, &q)));

    let routes = warp::path!("routes")
        .and(with_appdata(appdata.clone()))
        .map(|ad: Arc<AppData>| respond(list_routes(&ad.gtfs)));

    let route = warp::path!("route")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<RouteQuery>())
        .map(|ad: Arc<AppData>, q: RouteQuery| respond(get_route(&ad.gtfs, &q)));

    let shape = warp::path!("route" / "shape")
        .and(with_appdata(appdata.clone()))
        .and(warp::query::<RouteQuery>())
        .map(|ad: Arc<AppData>, q: RouteQuery| respond(route_shape(&ad.gtfs, &q)));

    let places = warp::path!("places")
        .and(with_appdata(appdata))
        .and(warp::query::<LocationQuery>())
        .map(|ad: Arc<AppData>, q: LocationQuery| respond(list_places(&ad.gtfs, &q)));

    warp::get()
        .and(
            health
                .or(stops)
                .unify()
                .or(nearest)
                .unify()
                .or(arrivals)
                .unify()
                .or(stop)
                .unify()
                .or(routes)
                .unify()
                .or(route)
                .unify()
                .or(shape)
                .unify()
                .or(places)
                .unify(),
        )
        .recover(handle_rejection)
        .unify()
}

pub async fn main(appdata: Arc<AppData>, config: &Configuration) {
    let cors_policy = warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "Origin",
            "Accept",
            "Authorization",
            "X-Requested-With",
            "Content-Type",
        ])
        .allow_methods(["GET", "POST", "OPTIONS"]);

    let log = warp::log("transit_api");
    let api = routes(appdata).with(cors_policy).with(log);

    info!(
        "Server listening on {}:{}",
        config.bind_address, config.port
    );
    info!("  GET /health");
    info!("  GET /stops?lat=&lon=&radius=");
    info!("  GET /stops/nearest?lat=&lon=");
    info!("  GET /stops/arrivals?stop_id=");
    info!("  GET /stop?stop_id=");
    info!("  GET /routes");
    info!("  GET /route?route_id=");
    info!("  GET /route/shape?route_id=");
    info!("  GET /places?lat=&lon=&radius=");

    warp::serve(api).run((config.bind_address, config.port)).await;
}
