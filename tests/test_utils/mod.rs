#![allow(dead_code)]

pub mod factories;
pub mod memory_store;

use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use reqwest::{redirect::Policy, Client, Response};
use uuid::Uuid;

use talent_backend::{
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState, Repositories,
};

use factories::TestPerson;
use memory_store::MemoryStore;

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Talent-API-Test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: "postgres://unused".into(),
        cors_allowed_origins: vec!["*".into()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 60,
        media_root: std::env::temp_dir()
            .join(format!("talent-media-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        media_url: "/media/".into(),
        run_migrations: false,
        sign_in_rate_limit: 100,
    }
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub state: web::Data<AppState>,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = test_config();
        customize(&mut config);

        let store = Arc::new(MemoryStore::default());
        let repos = Repositories {
            users: store.clone(),
            talent: store.clone(),
            persons: store.clone(),
            feedback: store.clone(),
        };
        let state = web::Data::new(AppState::with_repositories(&config, repos));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
        let port = listener.local_addr().expect("local addr").port();
        let address = format!("http://127.0.0.1:{port}");

        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("listen on test port")
        .workers(1)
        .run();

        actix_rt::spawn(server);

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("build http client");

        while client.get(format!("{address}/")).send().await.is_err() {
            actix_rt::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp {
            address,
            client,
            state,
            store,
            config,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Seeds a user with a person profile and issues its access token.
    pub fn create_person(&self, username: &str) -> TestPerson {
        let user = factories::user(&self.store, username);
        let person = factories::person(&self.store, &user);
        let token = self
            .state
            .auth_handler
            .token_service
            .create_jwt(&user)
            .expect("issue test token");
        TestPerson { user, person, token }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("send GET")
    }

    pub async fn get_as(&self, who: &TestPerson, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("Authorization", who.bearer())
            .send()
            .await
            .expect("send GET")
    }

    pub async fn post_form_as(&self, who: Option<&TestPerson>, path: &str, form: &[(&str, &str)]) -> Response {
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(who) = who {
            request = request.header("Authorization", who.bearer());
        }
        request.send().await.expect("send POST")
    }
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
