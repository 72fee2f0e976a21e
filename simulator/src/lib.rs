//! Local backend for the retrocade mini-app.
//!
//! Wraps one engine session behind a mutex and exposes the engine's call
//! contract as JSON over HTTP. Rendering, sound, and platform glue stay
//! in the browser client; this service only relays engine outcomes and
//! maps rejected requests to status codes.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use retrocade_execution::{casino::GameError, Session};
use retrocade_types::casino::{CoinSide, DiceDirection, GameType};

/// One player session behind a lock. Round submissions serialize here;
/// the engine itself never sees concurrent callers.
#[derive(Clone)]
pub struct Simulator {
    session: Arc<Mutex<Session>>,
}

impl Simulator {
    pub fn new(initial_balance: u64, seed: Option<u64>) -> Self {
        let session = match seed {
            Some(seed) => Session::seeded(initial_balance, seed),
            None => Session::new(initial_balance),
        };
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // Settlement never unwinds mid-mutation, so a poisoned lock still
        // guards a consistent session.
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub struct Api {
    simulator: Simulator,
}

impl Api {
    pub fn new(simulator: Simulator) -> Self {
        Self { simulator }
    }

    pub fn router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/balance", get(balance))
            .route("/history/:game", get(history))
            .route("/coinflip", post(coinflip))
            .route("/dice", post(dice))
            .route("/mines", get(mines_view))
            .route("/mines/start", post(mines_start))
            .route("/mines/reveal", post(mines_reveal))
            .route("/mines/cashout", post(mines_cash_out))
            .route("/mines/reset", post(mines_reset))
            .layer(cors)
            .with_state(self.simulator)
    }
}

#[derive(Deserialize)]
struct CoinflipRequest {
    stake: u64,
    side: CoinSide,
}

#[derive(Deserialize)]
struct DiceRequest {
    stake: u64,
    target: u8,
    direction: DiceDirection,
}

#[derive(Deserialize)]
struct MinesStartRequest {
    stake: u64,
    mine_count: u8,
}

#[derive(Deserialize)]
struct MinesRevealRequest {
    cell: u8,
}

async fn balance(State(simulator): State<Simulator>) -> Response {
    let balance = simulator.session().balance();
    Json(serde_json::json!({ "balance": balance })).into_response()
}

async fn history(State(simulator): State<Simulator>, Path(game): Path<GameType>) -> Response {
    let entries = simulator.session().history(game).to_vec();
    Json(entries).into_response()
}

async fn coinflip(
    State(simulator): State<Simulator>,
    Json(request): Json<CoinflipRequest>,
) -> Response {
    match simulator
        .session()
        .place_coinflip_bet(request.stake, request.side)
    {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => reject(err),
    }
}

async fn dice(State(simulator): State<Simulator>, Json(request): Json<DiceRequest>) -> Response {
    match simulator
        .session()
        .place_dice_bet(request.stake, request.target, request.direction)
    {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => reject(err),
    }
}

async fn mines_view(State(simulator): State<Simulator>) -> Response {
    Json(simulator.session().mines()).into_response()
}

async fn mines_start(
    State(simulator): State<Simulator>,
    Json(request): Json<MinesStartRequest>,
) -> Response {
    match simulator
        .session()
        .mines_start(request.stake, request.mine_count)
    {
        Ok(board) => Json(board).into_response(),
        Err(err) => reject(err),
    }
}

async fn mines_reveal(
    State(simulator): State<Simulator>,
    Json(request): Json<MinesRevealRequest>,
) -> Response {
    match simulator.session().mines_reveal(request.cell) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => reject(err),
    }
}

async fn mines_cash_out(State(simulator): State<Simulator>) -> Response {
    match simulator.session().mines_cash_out() {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => reject(err),
    }
}

async fn mines_reset(State(simulator): State<Simulator>) -> Response {
    simulator.session().mines_reset();
    StatusCode::NO_CONTENT.into_response()
}

/// Map an engine rejection to a status code; the body carries the
/// engine's own classification text.
fn reject(err: GameError) -> Response {
    let status = match err {
        GameError::InsufficientBalance(_) => StatusCode::PAYMENT_REQUIRED,
        GameError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        GameError::InvalidStateTransition(_) => StatusCode::CONFLICT,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
