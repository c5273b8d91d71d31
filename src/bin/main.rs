use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use tollgate::{
    AuthConfig, DatabaseConfig, UserCreate, UserDirectory, UserKey, create_authenticator,
    create_connection, ensure_schema, hash_password,
};

#[derive(Parser)]
#[command(name = "tollgate")]
#[command(about = "Bearer-token authentication gate for web APIs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server with authentication applied
    Serve {
        /// Bind address, e.g. 0.0.0.0:8080
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, default_value = "memory")]
        db_url: String,
        /// HS256 secret access tokens are signed with
        #[arg(long, env = "TOLLGATE_TOKEN_SECRET")]
        token_secret: String,
        /// Expiry leeway in seconds, to absorb issuer clock skew
        #[arg(long, default_value_t = 0)]
        leeway: u64,
    },
    /// Initialize the database
    Init {
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
    /// Create a new user in the directory
    CreateUser {
        /// Login email for the new user
        #[arg(long)]
        email: String,
        /// Optional display name
        #[arg(long)]
        display_name: Option<String>,
        /// Optional raw password; only its SHA-256 digest is stored
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
    /// List all users in the directory
    ListUsers {
        #[arg(long, default_value = "memory")]
        db_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tollgate=info".parse()?),
        )
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            db_url,
            token_secret,
            leeway,
        } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            info!("Using database url for API server: {}", db_config.url);

            let auth_config = AuthConfig::new(token_secret).with_leeway(leeway);
            let authenticator = create_authenticator(db_config, auth_config).await?;

            let app = tollgate::api::create_router(authenticator);

            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!("API server listening on http://{}", bind);

            axum::serve(listener, app).await?;
        }
        Commands::Init { db_url } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };
            info!("Using database url for initialization: {}", db_config.url);

            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;

            info!("Database initialized successfully");
        }
        Commands::CreateUser {
            email,
            display_name,
            password,
            db_url,
        } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };

            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;
            let directory = UserDirectory::new(db);

            let key = UserKey::new(Uuid::new_v4().simple().to_string());
            let create = UserCreate {
                email,
                display_name,
                password: password.as_deref().map(hash_password),
            };

            let user = directory.create_user(&key, &create).await?;

            println!("User created successfully!");
            println!();
            println!("  Id:     {}", user.id);
            println!("  Key:    {}", key);
            println!("  Email:  {}", user.email);
            if let Some(name) = &user.display_name {
                println!("  Name:   {}", name);
            }
            println!();
            println!(
                "Access tokens for this user must carry the claim: {{\"userId\": \"{}\"}}",
                key
            );
        }
        Commands::ListUsers { db_url } => {
            let db_config = DatabaseConfig {
                url: db_url,
                ..Default::default()
            };

            let db = create_connection(db_config).await?;
            ensure_schema(&db).await?;
            let directory = UserDirectory::new(db);

            let users = directory.list_users().await?;

            if users.is_empty() {
                println!("No users found.");
                return Ok(());
            }

            println!("{:<36} {:<32} {:<24}", "ID", "EMAIL", "CREATED");
            println!("{}", "-".repeat(92));

            for user in users {
                let created = user
                    .created_at
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());

                println!("{:<36} {:<32} {:<24}", user.id.to_string(), user.email, created);
            }
        }
    }

    Ok(())
}
