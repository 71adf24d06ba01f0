//! Prompt text for the narrative forecast

use domain::DailySummary;

/// Returned when both generation attempts fail
pub const APOLOGY: &str = "Sorry, I couldn't generate a forecast at the moment. Please try again.";

/// One-line request used to confirm the key and model work
pub const CONNECTIVITY_PROMPT: &str = "Say 'Hello from Gemini!' in one sentence.";

/// Full prompt listing every summary field
#[must_use]
pub fn detailed_prompt(summary: &DailySummary) -> String {
    format!(
        "You are a friendly weather assistant for India. Based on the following forecast data \
         for {city} for **TOMORROW** ({date}):\n\
         - Max Temperature: {max:.1}°C\n\
         - Min Temperature: {min:.1}°C\n\
         - Humidity: {humidity}\n\
         - Rain Probability: {rain:.1}%\n\
         - Weather: {description}\n\
         - Wind Speed: {wind}\n\
         - Pressure: {pressure} hPa\n\
         \n\
         Generate a short, helpful, and conversational 2-sentence weather forecast **for tomorrow**.\n\
         Be friendly and add a tip if relevant (e.g., carry an umbrella, wear light clothes).\n\
         Keep the tone casual and useful for daily planning.",
        city = summary.city,
        date = summary.forecast_time(),
        max = summary.temperature_max,
        min = summary.temperature_min,
        humidity = summary.humidity,
        rain = summary.rain_probability_avg_percent,
        description = summary.description,
        wind = summary.wind_speed,
        pressure = summary.pressure,
    )
}

/// Reduced prompt used for the single retry
#[must_use]
pub fn fallback_prompt(summary: &DailySummary) -> String {
    format!(
        "You are a friendly weather assistant. The weather for {city} on {date} will be \
         {description} with max temperature {max:.1}°C and rain probability {rain:.1}%. \
         Generate a short 2-sentence forecast.",
        city = summary.city,
        date = summary.forecast_time(),
        description = summary.description,
        max = summary.temperature_max,
        rain = summary.rain_probability_avg_percent,
    )
}
