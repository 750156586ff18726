/// Downloading user-sent files from the Telegram Bot API
use crate::errors::{BotError, BotResult};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GetFileResponse {
    ok: bool,
    result: Option<TelegramFile>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramFile {
    file_path: Option<String>,
}

/// Request URLs carry the bot token; errors keep only the cause
fn without_token(e: reqwest::Error) -> BotError {
    BotError::Http(e.without_url())
}

/// Resolve `file_id` with `getFile`, then fetch the bytes
pub async fn download_telegram_file(
    http: &Client,
    api_url: &str,
    bot_token: &str,
    file_id: &str,
) -> BotResult<Vec<u8>> {
    let api_url = api_url.trim_end_matches('/');

    let response: GetFileResponse = http
        .get(format!("{}/bot{}/getFile", api_url, bot_token))
        .query(&[("file_id", file_id)])
        .send()
        .await
        .map_err(without_token)?
        .json()
        .await
        .map_err(without_token)?;

    let file_path = resolve_file_path(response)?;

    let bytes = http
        .get(file_download_url(api_url, bot_token, &file_path))
        .send()
        .await
        .map_err(without_token)?
        .error_for_status()
        .map_err(without_token)?
        .bytes()
        .await
        .map_err(without_token)?;

    Ok(bytes.to_vec())
}

fn resolve_file_path(response: GetFileResponse) -> BotResult<String> {
    if !response.ok {
        return Err(BotError::Telegram(format!(
            "getFile failed: {}",
            response.description.unwrap_or_default()
        )));
    }

    response
        .result
        .and_then(|file| file.file_path)
        .ok_or_else(|| BotError::Telegram("getFile returned no file_path".to_string()))
}

pub fn file_download_url(api_url: &str, bot_token: &str, file_path: &str) -> String {
    format!("{}/file/bot{}/{}", api_url.trim_end_matches('/'), bot_token, file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_download_url() {
        assert_eq!(
            file_download_url("https://api.telegram.org/", "1:abc", "photos/file_3.jpg"),
            "https://api.telegram.org/file/bot1:abc/photos/file_3.jpg"
        );
    }

    #[test]
    fn test_resolve_file_path() {
        let ok: GetFileResponse = serde_json::from_str(
            r#"{"ok":true,"result":{"file_id":"x","file_unique_id":"y","file_path":"photos/a.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(resolve_file_path(ok).unwrap(), "photos/a.jpg");

        let failed: GetFileResponse =
            serde_json::from_str(r#"{"ok":false,"description":"Bad Request: invalid file_id"}"#)
                .unwrap();
        assert!(resolve_file_path(failed).is_err());
    }

    #[tokio::test]
    async fn test_request_errors_hide_bot_token() {
        let err = download_telegram_file(&Client::new(), "http://127.0.0.1:9", "123:SECRET", "f")
            .await
            .unwrap_err();
        let logged = err.to_string();
        assert!(logged.starts_with("HTTP error"));
        assert!(!logged.contains("SECRET"), "token leaked: {}", logged);
    }
}
