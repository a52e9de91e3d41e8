use chrono::Utc;
use dotenvy::dotenv;
use uuid::Uuid;

use seatrain::config::database::init_db_pool;
use seatrain::logging::init_tracing;
use seatrain::modules::auth::model::{User, UserRole};
use seatrain::router::init_router;
use seatrain::state::init_app_state;
use seatrain::store::Store;
use seatrain::store::postgres::PgStore;
use seatrain::utils::password::hash_password;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("Failed to bind port {port}: {e}"));
    tracing::info!("Server running on http://localhost:{port}");
    tracing::info!("Swagger UI available at http://localhost:{port}/swagger-ui");
    axum::serve(listener, app).await.expect("Server error");
}

/// Admin accounts are never created through the HTTP surface.
async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <email> <full_name> <password>", args[0]);
        std::process::exit(1);
    }

    let store = PgStore::new(init_db_pool().await);

    let password_hash = match hash_password(&args[4]) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Error hashing password: {}", e.error);
            std::process::exit(1);
        }
    };

    let admin = User {
        userid: Uuid::new_v4(),
        email: args[2].clone(),
        full_name: args[3].clone(),
        role: UserRole::Admin,
        password_hash,
        created_at: Utc::now(),
    };

    match store.insert_user(&admin).await {
        Ok(user) => {
            println!("Admin account created");
            println!("  Email: {}", user.email);
            println!("  Id:    {}", user.userid);
        }
        Err(e) => {
            eprintln!("Error creating admin: {}", e.error);
            std::process::exit(1);
        }
    }
}
