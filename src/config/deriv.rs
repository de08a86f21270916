pub struct DerivApiConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for DerivApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DERIV.client.timeout_ms,
            retries: DERIV.client.retries,
            backoff_ms: DERIV.client.backoff_ms,
        }
    }
}

pub struct WsConfig {
    pub base_url: &'static str,
    pub language: &'static str,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

pub struct DerivConfig {
    pub ws: WsConfig,
    pub client: ClientDefaults,
    /// Hard cap on `ticks_history` count per request (Deriv rejects above 5000).
    pub max_candles_per_request: usize,
}

pub const DERIV: DerivConfig = DerivConfig {
    ws: WsConfig {
        base_url: "wss://ws.derivws.com/websockets/v3",
        language: "EN",
    },
    client: ClientDefaults {
        timeout_ms: 20_000,
        retries: 3,
        backoff_ms: 2_000,
    },
    max_candles_per_request: 5000,
};
