#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // External ATS connection
    pub ats_base_url: String,
    pub ats_api_key: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let redis_url = std::env::var("REDIS_URL").ok();

        let ats_base_url = std::env::var("ATS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let ats_api_key = std::env::var("ATS_API_KEY").unwrap_or_else(|_| "".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        Config {
            database_url,
            redis_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port,
            ats_base_url,
            ats_api_key,
        }
    }
}
