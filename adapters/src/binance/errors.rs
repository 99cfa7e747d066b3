use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinanceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field} for {symbol}: {source}")]
    ParseFloat {
        symbol: String,
        field: &'static str,
        #[source]
        source: std::num::ParseFloatError,
    },
}
