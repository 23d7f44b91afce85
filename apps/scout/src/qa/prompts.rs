// Job QA prompt templates.

pub const LOCATION_SYSTEM: &str = "You are an AI specializing in geolocation.";

pub const LOCATION_PROMPT: &str = r#"Identify the closest city references in the text provided. If the location is listed as remote, return "remote". If the location is on the following list, or close to one of those cities, return that city. All other values should return "Other". Return only the city name.

List of cities:
{cities}

Text to analyze:
"{text}""#;
