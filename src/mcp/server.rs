//! Nutrilog MCP Server Implementation
//!
//! Exposes the logging tools over MCP. Each tool call is one user action.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::error::NutritionResult;
use crate::log::Session;
use crate::reference::{LoadPolicy, ReferenceTable};
use crate::tools::status::StatusTracker;
use crate::tools::{days, food_log, supplements, weight};

/// Nutrilog MCP Service
///
/// One service instance is one session: its logs are created with it and
/// dropped with it.
#[derive(Clone)]
pub struct NutrilogService {
    reference: &'static ReferenceTable,
    session: Arc<Mutex<Session>>,
    status_tracker: Arc<StatusTracker>,
    chart_dir: PathBuf,
    tool_router: ToolRouter<NutrilogService>,
}

impl NutrilogService {
    pub fn new(reference: &'static ReferenceTable, policy: LoadPolicy, chart_dir: PathBuf) -> Self {
        Self {
            reference,
            session: Arc::new(Mutex::new(Session::new())),
            status_tracker: Arc::new(StatusTracker::new(policy)),
            chart_dir,
            tool_router: Self::tool_router(),
        }
    }

    /// Lock the session for the duration of one action
    ///
    /// A poisoned lock is recovered: appends never leave a log half-written.
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// Successful results become tool output; domain failures become tool errors
/// carrying a structured `{error, message}` body
fn respond<T: Serialize>(result: NutritionResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(to_json(&value)?)])),
        Err(e) => {
            tracing::info!("Action rejected ({}): {}", e.kind(), e);
            Ok(CallToolResult::error(vec![Content::text(to_json(&e.to_failure())?)]))
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    /// Exact ingredient name (case-sensitive), see list_ingredients
    pub ingredient: String,
    /// Amount consumed
    pub quantity: f64,
    /// Unit of quantity (default "g"); also mg, kg, oz, lb, or e.g. "slice (28g)"
    pub unit: Option<String>,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogSupplementParams {
    /// Supplement name
    pub name: String,
    /// Dosage or other notes
    pub notes: Option<String>,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWeightParams {
    /// Body weight
    pub weight: f64,
    /// "kg" (default) or "lb"
    pub unit: Option<String>,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderWeightChartParams {
    /// Output PNG path (defaults to weight_chart.png in the chart directory)
    pub output_path: Option<String>,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

fn default_chart_width() -> u32 { 800 }
fn default_chart_height() -> u32 { 400 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListIngredientsParams {
    /// Case-insensitive name fragment
    pub query: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

fn default_list_limit() -> usize { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIngredientParams {
    /// Exact ingredient name
    pub name: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutrilogService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutrilog service: build info, reference table stats, log sizes and process information")]
    fn tracker_status(&self) -> Result<CallToolResult, McpError> {
        let counts = self.session().counts();
        let status = self.status_tracker.get_status(self.reference, counts);
        Ok(CallToolResult::success(vec![Content::text(to_json(&status)?)]))
    }

    #[tool(description = "Get instructions for logging food, supplements and weight. Call this at the start of a logging session.")]
    fn tracker_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TRACKER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TRACKER_INSTRUCTIONS)]))
    }

    // --- Reference ---

    #[tool(description = "List ingredients from the reference table, optionally filtered by a name fragment")]
    fn list_ingredients(&self, Parameters(p): Parameters<ListIngredientsParams>) -> Result<CallToolResult, McpError> {
        let result = food_log::list_ingredients(self.reference, p.query.as_deref(), p.limit);
        respond(Ok(result))
    }

    #[tool(description = "Get per-gram nutrition data for one ingredient by exact name")]
    fn get_ingredient(&self, Parameters(p): Parameters<GetIngredientParams>) -> Result<CallToolResult, McpError> {
        respond(food_log::get_ingredient(self.reference, &p.name))
    }

    // --- Logging ---

    #[tool(description = "Log food eaten: computes protein, carbs, fats and calories for the quantity and returns the day's totals")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session();
        respond(food_log::log_food(
            self.reference,
            &mut session,
            &p.ingredient,
            p.quantity,
            p.unit.as_deref(),
            p.date.as_deref(),
        ))
    }

    #[tool(description = "Log a supplement with optional dosage notes")]
    fn log_supplement(&self, Parameters(p): Parameters<LogSupplementParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session();
        respond(supplements::log_supplement(&mut session, &p.name, p.notes, p.date.as_deref()))
    }

    #[tool(description = "Log a body weight measurement")]
    fn log_weight(&self, Parameters(p): Parameters<LogWeightParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session();
        respond(weight::log_weight(&mut session, p.weight, p.unit.as_deref(), p.date.as_deref()))
    }

    // --- Views ---

    #[tool(description = "Get a day's food entries, macro and calorie totals, supplements and weigh-ins")]
    fn get_daily_summary(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let session = self.session();
        respond(days::get_daily_summary(&session, p.date.as_deref()))
    }

    #[tool(description = "List the supplements logged on a day")]
    fn list_supplements(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let session = self.session();
        respond(supplements::list_supplements(&session, p.date.as_deref()))
    }

    #[tool(description = "Get the weight history in the order it was logged")]
    fn get_weight_history(&self) -> Result<CallToolResult, McpError> {
        let session = self.session();
        respond(Ok(weight::get_weight_history(&session)))
    }

    #[tool(description = "Render the weight history as a PNG line chart and return the file path")]
    fn render_weight_chart(&self, Parameters(p): Parameters<RenderWeightChartParams>) -> Result<CallToolResult, McpError> {
        let output_path = p
            .output_path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.chart_dir.join("weight_chart.png"));
        let session = self.session();
        respond(weight::render_weight_chart(&session, &output_path, p.width, p.height))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutrilogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrilog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrilog".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrilog - daily food, supplement and body weight log. \
                 Call tracker_instructions first. \
                 Reference: list_ingredients/get_ingredient. \
                 Logging: log_food/log_supplement/log_weight. \
                 Views: get_daily_summary, list_supplements, get_weight_history, render_weight_chart. \
                 Logs are append-only and last for this session only."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientRecord;

    fn service() -> NutrilogService {
        let table = ReferenceTable::from_records(vec![IngredientRecord {
            name: "Chicken Breast".into(),
            protein_per_gram: 0.31,
            carbs_per_gram: 0.0,
            fats_per_gram: 0.036,
            reference_calories: 165.0,
            reference_portion_grams: 100.0,
        }]);
        let reference: &'static ReferenceTable = Box::leak(Box::new(table));
        NutrilogService::new(reference, LoadPolicy::SkipInvalid, std::env::temp_dir())
    }

    #[test]
    fn test_respond_maps_failures_to_tool_errors() {
        let ok = respond(Ok(serde_json::json!({"a": 1}))).unwrap();
        assert_ne!(ok.is_error, Some(true));

        let failed = respond::<()>(Err(crate::error::NutritionError::NotFound("Unicorn Meat".into()))).unwrap();
        assert_eq!(failed.is_error, Some(true));
    }

    #[test]
    fn test_clones_share_one_session() {
        let service = service();
        let other = service.clone();
        {
            let mut session = service.session();
            food_log::log_food(
                service.reference,
                &mut session,
                "Chicken Breast",
                150.0,
                None,
                Some("2024-01-01"),
            )
            .unwrap();
        }
        assert_eq!(other.session().counts().food, 1);
    }

    #[test]
    fn test_session_survives_a_panicked_action() {
        let service = service();
        let shared = service.clone();
        let result = std::thread::spawn(move || {
            let _session = shared.session();
            panic!("action failed mid-call");
        })
        .join();
        assert!(result.is_err());
        assert!(service.session.is_poisoned());

        let mut session = service.session();
        food_log::log_food(
            service.reference,
            &mut session,
            "Chicken Breast",
            100.0,
            None,
            Some("2024-01-01"),
        )
        .unwrap();
        assert_eq!(session.counts().food, 1);
    }
}
