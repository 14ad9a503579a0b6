//! HTTP handler functions for the landslide map API.

use actix_web::{HttpResponse, web};
use landslide_map_landslide_models::{FeatureRecord, Metric};
use landslide_map_legend::render::legend_panel_html;
use landslide_map_map::MapError;
use landslide_map_map::bounds::FitOptions;
use landslide_map_map::engine::StyleStore;
use landslide_map_map::help::{HELP_STORAGE_KEY, InputProfile, modal_html, should_show};
use landslide_map_map::toggle::LandslideMap;
use landslide_map_popup::{PopupConfig, PopupVariant, format_popup};
use landslide_map_server_models::{
    ApiHealth, CameraResponse, HelpQuery, HelpResponse, LayerVisibility, LegendQuery,
    MetricQuery, MetricRequest, MetricState, PopupQuery, PopupResponse,
};
use landslide_map_style::layers::{INITIAL_BEARING, INITIAL_PITCH, MAX_PITCH};

use crate::AppState;

const HTML: &str = "text/html; charset=utf-8";

fn metric_state(map: &LandslideMap<StyleStore>) -> MetricState {
    MetricState {
        metric: map.metric(),
        layers: Metric::all()
            .iter()
            .map(|metric| LayerVisibility {
                metric: *metric,
                visibility: map.visibility(*metric),
            })
            .collect(),
        legend: map.legend().cloned(),
    }
}

/// Applies `metric` to a copy of the shared map so each client's
/// selection stays its own.
fn switched(map: &LandslideMap<StyleStore>, metric: Metric) -> Result<MetricState, MapError> {
    let mut map = map.clone();
    map.set_metric(metric)?;
    Ok(metric_state(&map))
}

fn metric_response(map: &LandslideMap<StyleStore>, metric: Metric) -> HttpResponse {
    match switched(map, metric) {
        Ok(state) => HttpResponse::Ok().json(state),
        Err(e) => {
            log::error!("Failed to switch metric to {metric}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to switch metric"
            }))
        }
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /style.json`
///
/// The base style with the landslide sources, layers, terrain and sky
/// merged in.
pub async fn style_document(state: web::Data<AppState>) -> HttpResponse {
    let map = &state.map;
    let doc = map.engine().to_style_document(
        &state.base_style,
        Some(INITIAL_PITCH),
        Some(INITIAL_BEARING),
    );
    HttpResponse::Ok().json(doc)
}

/// `GET /api/legend`
///
/// Legend view-model for the requested metric, or the active one.
pub async fn legend(state: web::Data<AppState>, query: web::Query<LegendQuery>) -> HttpResponse {
    let map = &state.map;
    let metric = query.metric.unwrap_or_else(|| map.metric());

    match map.legend_for(metric, query.title.as_deref()) {
        Some(view) => HttpResponse::Ok().json(view),
        None => {
            log::warn!("No legend can be built for {metric}");
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("No legend for metric '{metric}'")
            }))
        }
    }
}

/// `GET /api/legend/html`
///
/// The legend panel with its metric switch. The body is left empty when
/// no legend can be built.
pub async fn legend_html(
    state: web::Data<AppState>,
    query: web::Query<LegendQuery>,
) -> HttpResponse {
    let metric = query.metric.unwrap_or_else(|| state.map.metric());
    let view = state.map.legend_for(metric, query.title.as_deref());

    HttpResponse::Ok()
        .content_type(HTML)
        .body(legend_panel_html(view.as_ref(), metric))
}

/// `GET /api/metric`
///
/// Visibility and legend for `?metric=`, or for the initial metric. The
/// shared map is never changed.
pub async fn get_metric(
    state: web::Data<AppState>,
    query: web::Query<MetricQuery>,
) -> HttpResponse {
    let metric = query.metric.unwrap_or_else(|| state.map.metric());
    metric_response(&state.map, metric)
}

/// `POST /api/metric`
///
/// Same as `GET /api/metric` with the metric in the body.
pub async fn switch_metric(
    state: web::Data<AppState>,
    body: web::Json<MetricRequest>,
) -> HttpResponse {
    metric_response(&state.map, body.metric)
}

/// `POST /api/popup`
///
/// Renders the popup for a clicked feature.
pub async fn popup(query: web::Query<PopupQuery>, body: web::Json<FeatureRecord>) -> HttpResponse {
    let variant = match query.variant.as_deref().map(str::parse::<PopupVariant>) {
        None => PopupVariant::default(),
        Some(Ok(variant)) => variant,
        Some(Err(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "variant must be 'extended' or 'condensed'"
            }));
        }
    };
    let config = PopupConfig {
        variant,
        escape: query.escape.unwrap_or(true),
    };

    HttpResponse::Ok().json(PopupResponse {
        html: format_popup(&body, &config),
    })
}

/// `GET /api/camera`
///
/// The initial camera: fitted incident bounds plus pitch and bearing.
pub async fn camera(state: web::Data<AppState>) -> HttpResponse {
    let map = &state.map;
    let camera = map.engine().camera().copied();
    let fit = camera.map_or_else(FitOptions::default, |c| FitOptions {
        padding: c.padding,
        max_zoom: c.max_zoom,
    });

    HttpResponse::Ok().json(CameraResponse {
        bounds: camera.map(|c| c.bounds),
        padding: fit.padding,
        max_zoom: fit.max_zoom,
        pitch: INITIAL_PITCH,
        bearing: INITIAL_BEARING,
        max_pitch: MAX_PITCH,
    })
}

/// `GET /api/help`
///
/// Decides whether to open the help overlay and renders it for the
/// client's input profile.
pub async fn help(query: web::Query<HelpQuery>) -> HttpResponse {
    let profile = InputProfile::detect(query.any_coarse, query.any_hover, query.ua_mobile);
    let show = should_show(query.dismissed.as_deref(), query.force);

    HttpResponse::Ok().json(HelpResponse {
        show,
        storage_key: HELP_STORAGE_KEY.to_string(),
        profile,
        html: if show {
            modal_html(profile)
        } else {
            String::new()
        },
    })
}
