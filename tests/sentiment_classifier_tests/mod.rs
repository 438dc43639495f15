mod keyword_override;
mod model_fallback;
