use rand::Rng;

/// Browser user agents the fetcher rotates through when none is configured.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:122.0) Gecko/20100101 Firefox/122.0",
];

/// Returns the configured user agent, or a random entry of [`USER_AGENTS`].
pub fn pick_user_agent(configured: Option<&str>) -> String {
    match configured {
        Some(agent) if !agent.trim().is_empty() => agent.to_string(),
        _ => {
            let mut rng = rand::rng();
            USER_AGENTS[rng.random_range(0..USER_AGENTS.len())].to_string()
        }
    }
}

/// Rounds `value` to `places` decimal digits.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
