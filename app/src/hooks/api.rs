use quizstake_engine::{GameMeta, PlayerProgressRecord, Question, Stage};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::API_URL;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GameDetail {
    #[serde(flatten)]
    pub meta: GameMeta,
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub basename: String,
    pub stake_amount: u64,
    pub player_limit: u32,
    /// Seconds the game stays open.
    pub duration: u64,
    /// Social handle the questions are generated from.
    pub username: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGame {
    pub id: String,
    pub question_hashes: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct JoinTicket {
    /// Server signature authorizing the on-chain join.
    pub signature: String,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct AnswerVerdict {
    pub is_correct: bool,
    pub score_delta: i32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStanding {
    pub basename: String,
    pub games_played: u32,
    pub games_won: u32,
    pub total_earned: u64,
    pub nfts: u32,
}

#[derive(Deserialize, Debug)]
pub struct LinkedBasename {
    pub basename: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    address: &'a str,
    basename: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerRequest<'a> {
    stage: Stage,
    question: u8,
    answer_hash: String,
    address: &'a str,
    basename: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateQuestionsRequest<'a> {
    username: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkBasenameRequest<'a> {
    address: &'a str,
    twitter_username: &'a str,
}

pub async fn fetch_games() -> Result<Vec<GameMeta>, String> {
    get_json(&format!("{API_URL}/games")).await
}

pub async fn fetch_game(game_id: &str) -> Result<GameDetail, String> {
    get_json(&format!("{API_URL}/games/{game_id}")).await
}

pub async fn generate_questions(username: &str) -> Result<Vec<Question>, String> {
    post_json(
        &format!("{API_URL}/questions/generate"),
        &GenerateQuestionsRequest { username },
    )
    .await
}

pub async fn create_game(request: &CreateGameRequest) -> Result<CreatedGame, String> {
    post_json(&format!("{API_URL}/games"), request).await
}

pub async fn join_game(game_id: &str, address: &str, basename: &str) -> Result<JoinTicket, String> {
    post_json(
        &format!("{API_URL}/games/{game_id}/join"),
        &JoinRequest { address, basename },
    )
    .await
}

/// Ask the evaluator whether the chosen option is correct. The option text
/// is sent as a commitment hash; the plain answer never leaves the client.
pub async fn evaluate_answer(
    game_id: &str,
    stage: Stage,
    question: u8,
    option_text: &str,
    address: &str,
    basename: &str,
) -> Result<AnswerVerdict, String> {
    post_json(
        &format!("{API_URL}/games/{game_id}/submit"),
        &SubmitAnswerRequest {
            stage,
            question,
            answer_hash: answer_hash(option_text),
            address,
            basename,
        },
    )
    .await
}

pub async fn fetch_leaderboard_records(game_id: &str) -> Result<Vec<PlayerProgressRecord>, String> {
    get_json(&format!("{API_URL}/games/{game_id}/leaderboard")).await
}

pub async fn fetch_global_leaderboard() -> Result<Vec<GlobalStanding>, String> {
    let mut standings: Vec<GlobalStanding> = get_json(&format!("{API_URL}/leaderboard")).await?;
    standings.sort_by(|a, b| b.games_won.cmp(&a.games_won));
    Ok(standings)
}

pub async fn link_basename(address: &str, twitter_username: &str) -> Result<LinkedBasename, String> {
    post_json(
        &format!("{API_URL}/basenames/link"),
        &LinkBasenameRequest {
            address,
            twitter_username,
        },
    )
    .await
}

/// SHA-256 commitment over the option text, hex-encoded with a 0x prefix.
pub fn answer_hash(option_text: &str) -> String {
    let digest = Sha256::digest(option_text.as_bytes());
    format!("0x{}", super::chain::encode_hex(&digest))
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let client = reqwest::Client::new();

    let response = client.get(url).send().await.map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("API error: {}", response.status()));
    }

    response.json().await.map_err(|e| e.to_string())
}

async fn post_json<T: serde::de::DeserializeOwned>(
    url: &str,
    body: &impl Serialize,
) -> Result<T, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("API error: {}", response.status()));
    }

    response.json().await.map_err(|e| e.to_string())
}
