pub struct Config {
    pub route_key: String,
    pub status_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_key: "route".into(),
            status_key: "easter_bunny_pre_tracking_updates".into(),
        }
    }
}
