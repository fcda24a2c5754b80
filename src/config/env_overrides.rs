use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("THOUGHTDESK_API_KEY")
            && !key.trim().is_empty()
        {
            self.api_key = Some(key.trim().to_string());
        }

        if let Ok(provider) = std::env::var("THOUGHTDESK_PROVIDER")
            && !provider.is_empty()
        {
            self.provider = provider;
        }

        if let Ok(base_url) = std::env::var("THOUGHTDESK_BASE_URL")
            && !base_url.is_empty()
        {
            self.base_url = Some(base_url);
        }

        if let Ok(model) = std::env::var("THOUGHTDESK_MODEL")
            && !model.is_empty()
        {
            self.extraction.model.clone_from(&model);
            self.assistant.model = model;
        }

        if let Ok(temp_str) = std::env::var("THOUGHTDESK_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.extraction.temperature = Some(temp);
            self.assistant.temperature = Some(temp);
        }
    }
}
