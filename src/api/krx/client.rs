use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, StockPriceEnvelope, StockPriceItem, BASIS_DATE_FORMAT};

/// Client for the Financial Services Commission stock price open API
/// (`GetStockSecuritiesInfoService`) published on data.go.kr
pub struct KrxClient {
    http_client: HttpClient,
    service_key: String,
    base_url: String,
}

impl KrxClient {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://apis.data.go.kr/1160100/service/GetStockSecuritiesInfoService";

    /// Rows requested per call; a lookback window never comes close.
    const MAX_ROWS: u32 = 100;

    /// Create a new client; `base_url` is normally [`Self::DEFAULT_BASE_URL`]
    pub fn with_base_url(service_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            service_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Map a non-success HTTP status to an error
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Stock price service error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /getStockPriceInfo
    ///
    /// Daily rows for one ISIN with `begin <= basDt < end_exclusive`.
    /// Rows come back in whatever order the service chooses.
    pub async fn get_stock_price_info(
        &self,
        isin: &str,
        begin: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<Vec<StockPriceItem>, ApiError> {
        let url = format!("{}/getStockPriceInfo", self.base_url);
        let begin_param = begin.format(BASIS_DATE_FORMAT).to_string();
        let end_param = end_exclusive.format(BASIS_DATE_FORMAT).to_string();
        let rows_param = Self::MAX_ROWS.to_string();

        debug!(
            "Requesting stock prices for {} ({} <= basDt < {})",
            isin, begin_param, end_param
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("resultType", "json"),
                ("numOfRows", rows_param.as_str()),
                ("pageNo", "1"),
                ("isinCd", isin),
                ("beginBasDt", begin_param.as_str()),
                ("endBasDt", end_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))?;

        let items = parse_stock_price_body(&body_text)?;
        if let Some(first) = items.first() {
            debug!(
                "Got {} row(s) for {} {} ({})",
                items.len(),
                first.itms_nm,
                first.srtn_cd,
                first.isin_cd
            );
        }
        Ok(items)
    }
}

/// Decode a `getStockPriceInfo` JSON body into its rows.
///
/// An invalid service key is answered with an XML document even when JSON was
/// requested, which surfaces here as a deserialization error.
pub fn parse_stock_price_body(body_text: &str) -> Result<Vec<StockPriceItem>, ApiError> {
    let envelope: StockPriceEnvelope = serde_json::from_str(body_text).map_err(|e| {
        let snippet: String = body_text.chars().take(200).collect();
        ApiError::DeserializationError(format!("Failed to parse response: {} ({})", e, snippet))
    })?;

    let header = envelope.response.header;
    if header.result_code != "00" {
        return Err(ApiError::ProviderError {
            code: header.result_code,
            message: header.result_msg,
        });
    }

    Ok(envelope
        .response
        .body
        .map(|body| body.items.into_vec())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPULATED: &str = r#"{
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {
                "numOfRows": 100, "pageNo": 1, "totalCount": 2,
                "items": {"item": [
                    {"basDt": "20240105", "srtnCd": "003230", "isinCd": "KR7003230000", "itmsNm": "삼양식품",
                     "mrktCtg": "KOSPI", "clpr": "72000", "vs": "2000", "fltRt": "2.86",
                     "mkp": "70500", "hipr": "72500", "lopr": "70000", "trqu": "51234"},
                    {"basDt": "20240104", "srtnCd": "003230", "isinCd": "KR7003230000", "itmsNm": "삼양식품",
                     "mrktCtg": "KOSPI", "clpr": "70000", "vs": "-500", "fltRt": "-.71",
                     "mkp": "70400", "hipr": "70900", "lopr": "69800", "trqu": "40123"}
                ]}
            }
        }
    }"#;

    #[test]
    fn test_parse_populated_body() {
        let items = parse_stock_price_body(POPULATED).expect("valid body");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].bas_dt, "20240105");
        assert_eq!(items[1].clpr, "70000");
        assert_eq!(items[0].itms_nm, "삼양식품");
    }

    #[test]
    fn test_parse_empty_items_string() {
        let body = r#"{"response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {"numOfRows": 100, "pageNo": 1, "totalCount": 0, "items": ""}
        }}"#;

        let items = parse_stock_price_body(body).expect("empty body is not an error");
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_single_object_item() {
        let body = r#"{"response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {"items": {"item": {"basDt": "20240105", "clpr": "72000",
                "mkp": "70500", "hipr": "72500", "lopr": "70000"}}}
        }}"#;

        let items = parse_stock_price_body(body).expect("valid body");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].trqu, "");
    }

    #[test]
    fn test_parse_provider_error_header() {
        let body = r#"{"response": {
            "header": {"resultCode": "30", "resultMsg": "SERVICE_KEY_IS_NOT_REGISTERED_ERROR"}
        }}"#;

        let err = parse_stock_price_body(body).unwrap_err();
        match err {
            ApiError::ProviderError { code, message } => {
                assert_eq!(code, "30");
                assert!(message.contains("SERVICE_KEY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_xml_error_body() {
        let body = "<OpenAPI_ServiceResponse><cmmMsgHeader><errMsg>SERVICE ERROR</errMsg></cmmMsgHeader></OpenAPI_ServiceResponse>";

        let err = parse_stock_price_body(body).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert!(err.to_string().contains("OpenAPI_ServiceResponse"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = KrxClient::with_base_url("key".to_string(), "http://localhost:9999/".to_string());
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
