// Application state for HTTP handlers
use crate::application::aqi_service::AqiService;
use crate::application::route_advisor::RouteAdvisor;

#[derive(Clone)]
pub struct AppState {
    pub aqi_service: AqiService,
    pub route_advisor: RouteAdvisor,
}
