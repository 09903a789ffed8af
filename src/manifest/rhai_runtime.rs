use rhai::{Dynamic, Engine};

/// Create a sandboxed Rhai engine for evaluating manifest scripts.
///
/// Rhai has no filesystem or process access unless a module registers it;
/// none is registered here.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();

    engine.set_max_call_levels(32);
    engine.set_max_operations(100_000);
    engine.set_max_string_size(1024 * 1024);
    engine.set_max_array_size(10_000);
    engine.set_max_map_size(10_000);

    engine.on_print(|text| log::debug!("manifest script: {text}"));
    engine.on_debug(|text, _source, pos| log::debug!("manifest script {pos}: {text}"));

    engine
}

/// Evaluate a manifest script and convert its final expression to JSON.
pub fn eval_manifest(script: &str) -> Result<serde_json::Value, String> {
    let engine = create_engine();
    let value: Dynamic = engine.eval(script).map_err(|e| e.to_string())?;
    rhai::serde::from_dynamic(&value).map_err(|e| e.to_string())
}
