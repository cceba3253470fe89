//! Request dispatch and tool implementations

use gauge_core::{GaugeError, Value};
use gauge_plugin::{EvalContext, PluginRegistry};
use gauge_units::{Category, UNITS};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::config::{ServerConfig, MAX_PRECISION};
use crate::protocol::{McpError, McpRequest, McpResponse};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "gauge";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const TOOL_NAMES: [&str; 6] = [
    "convert", "describe", "list_categories", "list_units", "gauge", "list_functions",
];

pub struct GaugeServer {
    registry: PluginRegistry,
    config: ServerConfig,
}

impl GaugeServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: gauge_units::units_registry(),
            config,
        }
    }

    pub fn function_count(&self) -> usize {
        self.registry.function_names().len()
    }

    /// Handle one line of input. Returns `None` when nothing should be written back.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "malformed request");
                return Some(McpResponse::failure(None, McpError::parse_error(e)));
            }
        };

        debug!(method = %request.method, "processing");
        let response = self.handle_request(&request);

        if request.is_notification() {
            debug!(method = %request.method, "notification processed (no response)");
            return None;
        }
        Some(response)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => self.handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => {
                debug!(method = %request.method, code = e.code, message = %e.message, "request failed");
                McpResponse::failure(request.id.clone(), e)
            }
        }
    }

    fn handle_initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let client_info = params.as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        // Use client's protocol version for compatibility
        let client_protocol = params.as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client = client_info, protocol = client_protocol, "client connected");

        Ok(json!({
            "protocolVersion": client_protocol,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": "Unit conversion across length, weight, temperature, volume, speed, time and energy"
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "instructions": "Gauge converts values between units of one category. Use 'list_categories' and 'list_units' to discover unit names, then 'convert'. Short symbols such as km, lb or °F are accepted."
        }))
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        debug!(tool = name, "tool call");

        match name {
            "convert" => self.tool_convert(&args),
            "describe" => self.tool_describe(&args),
            "list_categories" => Ok(tool_list_categories()),
            "list_units" => self.tool_list_units(&args),
            "gauge" => Ok(self.tool_gauge(&args)),
            "list_functions" => Ok(self.tool_list_functions(&args)),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))
                .with_data(json!({ "available": TOOL_NAMES }))),
        }
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let call_args = conversion_args(args)?;
        let ctx = self.eval_context(args)?;

        let result = self.registry.call_function("convert", &call_args, &ctx);
        if let Some(err) = result.as_error() {
            return Ok(tool_error(err));
        }
        let sentence = self.registry.call_function("describe", &call_args, &ctx);

        Ok(json!({
            "content": [{ "type": "text", "text": sentence.as_text().unwrap_or_default() }],
            "data": {
                "value": call_args[0].to_number().to_json(),
                "from_unit": call_args[1].to_json(),
                "to_unit": call_args[2].to_json(),
                "category": call_args[3].to_json(),
                "result": result.to_json()
            },
            "isError": false
        }))
    }

    fn tool_describe(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let call_args = conversion_args(args)?;
        let ctx = self.eval_context(args)?;

        let sentence = self.registry.call_function("describe", &call_args, &ctx);
        match sentence.as_text() {
            Some(text) => Ok(json!({
                "content": [{ "type": "text", "text": text }],
                "data": { "text": text },
                "isError": false
            })),
            None => Ok(tool_error_value(&sentence)),
        }
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = args.get("category")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing category argument"))?;

        let ctx = EvalContext::new();
        let units = self.registry.call_function("units", &[Value::from(category)], &ctx);
        let Some(list) = units.as_list() else {
            return Ok(tool_error_value(&units));
        };

        let lines: Vec<String> = list.iter().map(|unit| {
            let mut line = format!(
                "- {} ({})",
                unit.get("name").as_text().unwrap_or_default(),
                unit.get("symbol").as_text().unwrap_or_default()
            );
            if unit.get("base").as_bool() == Some(true) {
                line.push_str(" [base]");
            }
            line
        }).collect();

        Ok(json!({
            "content": [{ "type": "text", "text": lines.join("\n") }],
            "data": units.to_json(),
            "isError": false
        }))
    }

    fn tool_gauge(&self, args: &JsonValue) -> JsonValue {
        let name = args.get("name").and_then(|v| v.as_str());
        let help = self.registry.help(name);

        json!({
            "content": [{ "type": "text", "text": format_help(&help) }],
            "data": help.to_json(),
            "isError": help.is_error()
        })
    }

    fn tool_list_functions(&self, args: &JsonValue) -> JsonValue {
        let category = args.get("category").and_then(|v| v.as_str());
        let functions = self.registry.list_functions(category);

        let lines: Vec<String> = functions.as_list().unwrap_or_default().iter()
            .map(|f| format!(
                "- `{}`: {}",
                f.get("usage").as_text().unwrap_or_default(),
                f.get("description").as_text().unwrap_or_default()
            ))
            .collect();

        json!({
            "content": [{ "type": "text", "text": lines.join("\n") }],
            "data": functions.to_json()
        })
    }

    /// Context for a tool call; an explicit `precision` argument overrides the configured one
    fn eval_context(&self, args: &JsonValue) -> Result<EvalContext, McpError> {
        let precision = match args.get("precision") {
            None | Some(JsonValue::Null) => self.config.precision,
            Some(v) => v.as_u64()
                .and_then(|p| u32::try_from(p).ok())
                .filter(|&p| p <= MAX_PRECISION)
                .ok_or_else(|| McpError::invalid_params(format!(
                    "precision must be an integer between 0 and {}", MAX_PRECISION
                )))?,
        };
        Ok(EvalContext::new().with_precision(precision))
    }
}

/// Positional arguments of `convert`/`describe` from a tool's named arguments
fn conversion_args(args: &JsonValue) -> Result<[Value; 4], McpError> {
    let value = args.get("value")
        .filter(|v| !v.is_null())
        .ok_or_else(|| McpError::invalid_params("Missing value argument"))?;

    let text = |key: &str| args.get(key)
        .and_then(|v| v.as_str())
        .map(Value::from)
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)));

    Ok([
        Value::from_json(value),
        text("from_unit")?,
        text("to_unit")?,
        text("category")?,
    ])
}

fn tool_error(err: &GaugeError) -> JsonValue {
    debug!(code = %err.code, message = %err.message, "tool error");
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", err) }],
        "data": Value::Error(err.clone()).to_json(),
        "isError": true
    })
}

fn tool_error_value(value: &Value) -> JsonValue {
    match value.as_error() {
        Some(err) => tool_error(err),
        None => tool_error(&GaugeError::internal(format!(
            "unexpected {} result", value.type_name()
        ))),
    }
}

fn tool_list_categories() -> JsonValue {
    let data: Vec<JsonValue> = Category::ALL.iter()
        .map(|&c| json!({ "name": c.name(), "base_unit": UNITS.base_unit(c).name }))
        .collect();

    let text = Category::ALL.iter()
        .map(|&c| format!("- {} (base: {})", c, UNITS.base_unit(c)))
        .collect::<Vec<_>>()
        .join("\n");

    json!({
        "content": [{ "type": "text", "text": text }],
        "data": data
    })
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") { out.push_str(&format!("# {}\n\n", n)); }
            if let Some(Value::Text(d)) = map.get("description") { out.push_str(&format!("{}\n\n", d)); }
            if let Some(Value::Text(u)) = map.get("usage") { out.push_str(&format!("**Usage:** `{}`\n\n", u)); }
            if let Some(Value::List(examples)) = map.get("examples") {
                for e in examples.iter().filter_map(Value::as_text) {
                    out.push_str(&format!("- `{}`\n", e));
                }
            }
            if let Some(Value::Object(groups)) = map.get("functions") {
                let mut categories: Vec<_> = groups.keys().collect();
                categories.sort();
                for category in categories {
                    let names: Vec<&str> = groups[category].as_list().unwrap_or_default()
                        .iter()
                        .filter_map(Value::as_text)
                        .collect();
                    out.push_str(&format!("**{}:** {}\n", category, names.join(", ")));
                }
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        _ => format!("{:?}", help),
    }
}

fn tools_list() -> JsonValue {
    let conversion_schema = json!({
        "type": "object",
        "properties": {
            "value": {
                "type": ["number", "string"],
                "description": "Value to convert"
            },
            "from_unit": {
                "type": "string",
                "description": "Source unit name or symbol (e.g. \"kilometers\", \"km\")"
            },
            "to_unit": {
                "type": "string",
                "description": "Target unit name or symbol"
            },
            "category": {
                "type": "string",
                "description": "Unit category",
                "enum": Category::names()
            },
            "precision": {
                "type": "integer",
                "description": "Decimal places in the result sentence",
                "minimum": 0,
                "maximum": MAX_PRECISION
            }
        },
        "required": ["value", "from_unit", "to_unit", "category"]
    });

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category. Returns the numeric result and a sentence.",
                "inputSchema": conversion_schema.clone()
            },
            {
                "name": "describe",
                "description": "Convert a value and return only the sentence, e.g. \"1 kilometers is equal to 0.62 miles\".",
                "inputSchema": conversion_schema
            },
            {
                "name": "list_categories",
                "description": "List the unit categories and their base units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category with their symbols.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": Category::names()
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "gauge",
                "description": "Get documentation for a function, or general help about Gauge.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for general help."
                        }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List all available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter by function category",
                            "enum": ["units"]
                        }
                    }
                }
            }
        ]
    })
}
