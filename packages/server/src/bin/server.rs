//! Parlor relay server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use parlor_server::{
    domain::DEFAULT_HISTORY_CAPACITY,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        ConnectClientUseCase, DEFAULT_HEARTBEAT_INTERVAL_MS, DisconnectClientUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, HeartbeatMonitor, JoinRoomUseCase,
        SendMessageUseCase, dispatch_lock,
    },
};
use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "Room-based WebSocket message relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of chat messages retained per room
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Milliseconds between heartbeat sweeps
    #[arg(long, default_value_t = DEFAULT_HEARTBEAT_INTERVAL_MS)]
    heartbeat_interval_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Wire dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    let registry = Arc::new(InMemoryRoomRegistry::new(args.history_capacity));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let dispatch = dispatch_lock();

    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        dispatch.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        dispatch.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        dispatch.clone(),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry.clone()));

    let heartbeat = Arc::new(HeartbeatMonitor::new(
        registry.clone(),
        message_pusher.clone(),
        Duration::from_millis(args.heartbeat_interval_ms),
    ));

    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        join_room_usecase,
        send_message_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        heartbeat,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
