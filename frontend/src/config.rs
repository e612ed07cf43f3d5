pub struct Config {
    pub api_base_url: &'static str,
    pub pusher_key: Option<&'static str>,
    pub pusher_cluster: Option<&'static str>,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            api_base_url: "/api",
            // Baked in at build time; when absent the page runs in
            // polling-only mode.
            pusher_key: option_env!("PUSHER_KEY"),
            pusher_cluster: option_env!("PUSHER_CLUSTER"),
        }
    }

    pub fn channel(&self) -> Option<(&'static str, &'static str)> {
        match (self.pusher_key, self.pusher_cluster) {
            (Some(key), Some(cluster)) => Some((key, cluster)),
            _ => None,
        }
    }
}

pub const CONFIG: Config = Config::new();
