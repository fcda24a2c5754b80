use thoughtdesk::Config;
use thoughtdesk::llm::resolve_api_key;

pub fn render_status(config: &Config) -> String {
    let key_state = if resolve_api_key(&config.provider, config.api_key.as_deref()).is_some() {
        "set"
    } else {
        "missing"
    };

    [
        "◆ thoughtdesk".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("Provider    {}", config.provider),
        format!(
            "Endpoint    {}",
            config.base_url.as_deref().unwrap_or("(provider default)")
        ),
        format!("API key     {key_state}"),
        format!("Timeout     {}s", config.request_timeout_secs),
        String::new(),
        format!(
            "Extraction  {} (max {} tokens, temperature {})",
            config.extraction.model,
            config.extraction.max_tokens,
            temperature_label(config.extraction.temperature)
        ),
        format!(
            "Assistant   {} (max {} tokens, temperature {})",
            config.assistant.model,
            config.assistant.max_tokens,
            temperature_label(config.assistant.temperature)
        ),
    ]
    .join("\n")
}

fn temperature_label(temperature: Option<f64>) -> String {
    temperature.map_or_else(|| "default".to_string(), |t| format!("{t}"))
}
