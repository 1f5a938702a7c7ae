use crate::configuration::ArrivalsConfiguration;
use anyhow::{bail, Context};
use futures::future::BoxFuture;
use futures::FutureExt;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::StatusCode;
use serde::de::{Deserialize, Deserializer};
use serde::Serialize;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; TransportApp/1.0)";
const KENTKART_ORIGIN: &str = "https://m.kentkart.com";
const KENTKART_REFERER: &str = "https://m.kentkart.com/";

/// A vehicle expected at a stop
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StopArrival {
    pub route_code: String,
    pub route_name: String,
    pub route_color: String,
    pub direction: String,
    pub route_type: String,
    pub arrival_time: String,
    pub headsign: String,
}

/// Where real-time arrivals come from
pub trait ArrivalsSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        stop_id: &'a str,
        latitude: f64,
        longitude: f64,
    ) -> BoxFuture<'a, anyhow::Result<Vec<StopArrival>>>;
}

/// Client of the Kentkart "nearest bus" endpoint
pub struct KentkartClient {
    client: reqwest::Client,
    base_url: String,
    region: String,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct NearestBusResponse {
    #[serde(deserialize_with = "null_as_default")]
    result: KentkartResult,
    #[serde(deserialize_with = "null_as_default")]
    route_list: Vec<RouteInfo>,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
struct KentkartResult {
    code: i64,
    message: String,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
struct RouteInfo {
    display_route_code: String,
    name: String,
    head_sign: String,
    route_color: String,
    direction: String,
    route_type: String,
    stop_arrival_time: String,
    next_trip_arrival_time: String,
}

impl From<RouteInfo> for StopArrival {
    fn from(route: RouteInfo) -> Self {
        let arrival_time = if route.next_trip_arrival_time.is_empty() {
            route.stop_arrival_time
        } else {
            route.next_trip_arrival_time
        };
        StopArrival {
            route_code: route.display_route_code,
            route_name: route.name,
            route_color: route.route_color,
            direction: route.direction,
            route_type: route.route_type,
            arrival_time,
            headsign: route.head_sign,
        }
    }
}

fn null_as_default<'de, T, D>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(|opt| opt.unwrap_or_default())
}

impl KentkartClient {
    pub fn new(config: &ArrivalsConfiguration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("creating the arrivals http client")?;

        Ok(KentkartClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            region: config.region.clone(),
        })
    }

    pub async fn get_stop_arrivals(
        &self,
        stop_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<Vec<StopArrival>> {
        let response = self.nearest_bus(stop_id, latitude, longitude).await?;
        Ok(parse_arrivals(response))
    }

    async fn nearest_bus(
        &self,
        stop_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<NearestBusResponse> {
        let lat = format!("{latitude:.6}");
        let lng = format!("{longitude:.6}");

        let response = self
            .client
            .get(format!("{}/nearest/bus", self.base_url))
            .query(&[
                ("region", self.region.as_str()),
                ("lang", "tr"),
                ("authType", "4"),
                ("accuracy", "0"),
                ("lat", lat.as_str()),
                ("lng", lng.as_str()),
                ("busStopId", stop_id),
            ])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ORIGIN, KENTKART_ORIGIN)
            .header(REFERER, KENTKART_REFERER)
            .send()
            .await
            .context("executing request")?;

        if response.status() != StatusCode::OK {
            bail!("unexpected status code: {}", response.status());
        }

        let result: NearestBusResponse = response.json().await.context("parsing response")?;
        debug!(
            "kentkart answered {} ({}) with {} routes for stop {}",
            result.result.code,
            result.result.message,
            result.route_list.len(),
            stop_id
        );
        Ok(result)
    }
}

fn parse_arrivals(response: NearestBusResponse) -> Vec<StopArrival> {
    response
        .route_list
        .into_iter()
        .map(StopArrival::from)
        .collect()
}

impl ArrivalsSource for KentkartClient {
    fn fetch<'a>(
        &'a self,
        stop_id: &'a str,
        latitude: f64,
        longitude: f64,
    ) -> BoxFuture<'a, anyhow::Result<Vec<StopArrival>>> {
        self.get_stop_arrivals(stop_id, latitude, longitude).boxed()
    }
}
