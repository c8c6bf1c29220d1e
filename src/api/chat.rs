//! Chat, goal and history endpoints

use crate::api::ApiError;
use crate::api::chat::schemas::{
    ChatRequest, ChatResponse, ClearHistoryRequest, GetGoalQuery, GoalResponse, MessageResponse,
    SetGoalRequest,
};
use crate::core::traits::ChatService;
use axum::body::Bytes;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use serde::de::DeserializeOwned;

const CHAT_ERROR: &str = "Error processing chat request";
const SET_GOAL_ERROR: &str = "Error setting goal";
const GET_GOAL_ERROR: &str = "Error getting goal";
const CLEAR_HISTORY_ERROR: &str = "Error clearing history";

pub fn router() -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/set_goal", post(set_goal))
        .route("/get_goal", get(get_goal))
        .route("/clear_history", post(clear_history))
}

/// `application/json` or any `application/*+json`, ignoring parameters such as charset.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Bodies are parsed by hand so that a wrong content type or malformed JSON is reported
/// like any other failure (500 with the endpoint prefix) instead of axum's 4xx rejections.
fn parse_body<T: DeserializeOwned>(
    context: &'static str,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<T, ApiError> {
    if !is_json(headers) {
        return Err(ApiError::internal(
            context,
            "request Content-Type was not 'application/json'",
        ));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::internal(context, e))
}

async fn chat(
    Inject(chat_service): Inject<dyn ChatService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = parse_body(CHAT_ERROR, &headers, &body)?;

    let reply = chat_service
        .chat(&request.user_id, &request.message)
        .await
        .map_err(|e| ApiError::from_service(CHAT_ERROR, e))?;

    Ok(Json(ChatResponse::from(reply)))
}

async fn set_goal(
    Inject(chat_service): Inject<dyn ChatService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: SetGoalRequest = parse_body(SET_GOAL_ERROR, &headers, &body)?;

    chat_service
        .set_goal(&request.user_id, request.goal.as_deref())
        .await
        .map_err(|e| ApiError::from_service(SET_GOAL_ERROR, e))?;

    Ok(Json(MessageResponse::new("Goal set successfully")))
}

async fn get_goal(
    Inject(chat_service): Inject<dyn ChatService>,
    query: Result<Query<GetGoalQuery>, QueryRejection>,
) -> Result<Json<GoalResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::internal(GET_GOAL_ERROR, e.body_text()))?;

    let goal = chat_service
        .get_goal(&query.user_id)
        .await
        .map_err(|e| ApiError::from_service(GET_GOAL_ERROR, e))?;

    Ok(Json(GoalResponse { goal }))
}

async fn clear_history(
    Inject(chat_service): Inject<dyn ChatService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: ClearHistoryRequest = parse_body(CLEAR_HISTORY_ERROR, &headers, &body)?;

    chat_service
        .clear_history(&request.user_id)
        .await
        .map_err(|e| ApiError::from_service(CLEAR_HISTORY_ERROR, e))?;

    Ok(Json(MessageResponse::new("Conversation history cleared")))
}

pub mod schemas {
    use crate::core::traits::ChatReply;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize};
    use serde_json::Value;

    /// Accepts strings and other scalars (numbers and booleans as their JSON text).
    /// `null` counts as no value; arrays and objects are rejected.
    fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
            Some(other) => Err(D::Error::custom(format!("expected text, found {other}"))),
        }
    }

    /// Like [`scalar_text`], with `null` read as an empty string.
    fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_text(deserializer).map(Option::unwrap_or_default)
    }

    fn empty_goal() -> Option<String> {
        Some(String::new())
    }

    #[derive(Deserialize, Debug)]
    pub struct ChatRequest {
        #[serde(default, deserialize_with = "text_or_empty")]
        pub message: String,
        #[serde(default, deserialize_with = "text_or_empty")]
        pub user_id: String,
    }

    #[derive(Serialize, Debug)]
    pub struct ChatResponse {
        pub response: String,
        /// The classifier label, or its error text when classification failed.
        pub detected_mood: String,
    }

    impl From<ChatReply> for ChatResponse {
        fn from(reply: ChatReply) -> Self {
            ChatResponse {
                response: reply.response,
                detected_mood: reply.mood.into_mood(),
            }
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct SetGoalRequest {
        #[serde(default, deserialize_with = "text_or_empty")]
        pub user_id: String,
        /// A missing goal is stored as `""`, an explicit `null` unsets it.
        #[serde(default = "empty_goal", deserialize_with = "scalar_text")]
        pub goal: Option<String>,
    }

    #[derive(Deserialize, Debug)]
    pub struct GetGoalQuery {
        #[serde(default)]
        pub user_id: String,
    }

    #[derive(Serialize, Debug)]
    pub struct GoalResponse {
        pub goal: Option<String>,
    }

    #[derive(Deserialize, Debug)]
    pub struct ClearHistoryRequest {
        #[serde(default, deserialize_with = "text_or_empty")]
        pub user_id: String,
    }

    #[derive(Serialize, Debug)]
    pub struct MessageResponse {
        pub message: &'static str,
    }

    impl MessageResponse {
        pub fn new(message: &'static str) -> Self {
            MessageResponse { message }
        }
    }

}
