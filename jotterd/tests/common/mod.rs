#![allow(dead_code)]

use std::error::Error;
use assert_fs::TempDir;
use jotter::config::figment::FigmentExt;
use rocket::figment::Figment;
use rocket::http::{ContentType, Cookie, Method, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::{json, Value};

pub const TEST_COOKIE_SECRET: &str = "integration test secret";
pub const PASSWORD: &str = "secret1";
pub const BOUNDARY: &str = "jotter-test-boundary";

// a 1x1 transparent png
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
    0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

pub struct TestApp {
    pub client: Client,
    pub dir: TempDir,
}

pub struct Reply {
    pub status: Status,
    pub body: Value,
    pub cookies: Vec<Cookie<'static>>,
}

impl Reply {
    async fn read(response: LocalResponse<'_>) -> Reply {
        let status = response.status();
        let cookies = response.cookies().iter().cloned().collect();
        let body = response.into_string()
            .await
            .filter(|s| !s.is_empty())
            .map(|s| serde_json::from_str(&s).unwrap_or_else(|_| Value::String(s)))
            .unwrap_or(Value::Null);
        Reply { status, body, cookies }
    }

    pub fn cookie(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies.iter().find(|c| c.name() == name)
    }
}

pub fn test_figment(dir: &TempDir, auth_scheme: &str) -> Figment {
    Figment::from(rocket::Config::debug_default())
        .setup_app_defaults()
        .merge(("database", dir.path().join("jotter.toml")))
        .merge(("uploads_directory", dir.path().join("uploads")))
        .merge(("static_directory", dir.path().join("static")))
        .merge(("auth_scheme", auth_scheme))
        .merge(("cookie_secret", TEST_COOKIE_SECRET))
        .merge(("hasher_config.argon2_m_cost", 1024))
        .merge(("hasher_config.argon2_t_cost", 1))
        .merge(("log_level", "off"))
}

pub async fn launch(auth_scheme: &str) -> Result<TestApp, Box<dyn Error>> {
    let dir = TempDir::new()?;
    let client = Client::untracked(
        jotterd::build_rocket(test_figment(&dir, auth_scheme))
    ).await?;
    Ok(TestApp { client, dir })
}

pub fn multipart_image(note_id: i64, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"note_id\"\r\n\r\n\
         {note_id}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"upload\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    ).into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        body: Option<Value>,
    ) -> Reply {
        let mut request = self.client.req(method, uri.to_owned());
        if let Some(cookie) = cookie {
            request = request.cookie(cookie.clone());
        }
        if let Some(body) = body {
            request = request
                .header(ContentType::JSON)
                .body(body.to_string());
        }
        Reply::read(request.dispatch().await).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&Cookie<'static>>) -> Reply {
        self.request(Method::Get, uri, cookie, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        body: Value,
    ) -> Reply {
        self.request(Method::Post, uri, cookie, Some(body)).await
    }

    pub async fn put(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        body: Value,
    ) -> Reply {
        self.request(Method::Put, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&Cookie<'static>>) -> Reply {
        self.request(Method::Delete, uri, cookie, None).await
    }

    pub async fn signup(&self, username: &str, password: &str) -> Reply {
        self.post(
            "/api/signup",
            None,
            json!({ "username": username, "password": password }),
        ).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Reply {
        self.post(
            "/api/login",
            None,
            json!({ "username": username, "password": password }),
        ).await
    }

    /// Signs a fresh user up and returns its token cookie.
    pub async fn user(&self, username: &str) -> Result<Cookie<'static>, Box<dyn Error>> {
        let signup = self.signup(username, PASSWORD).await;
        assert_eq!(signup.status, Status::Created, "{}", signup.body);
        let login = self.login(username, PASSWORD).await;
        assert_eq!(login.status, Status::Ok, "{}", login.body);
        login.cookies
            .into_iter()
            .find(|c| !c.value().is_empty())
            .ok_or_else(|| "no token cookie after login".into())
    }

    pub async fn upload_image(
        &self,
        cookie: &Cookie<'static>,
        note_id: i64,
        content_type: &str,
        bytes: &[u8],
    ) -> Reply {
        self.send_upload(Some(cookie), note_id, content_type, bytes).await
    }

    pub async fn upload_without_token(
        &self,
        note_id: i64,
        content_type: &str,
        bytes: &[u8],
    ) -> Reply {
        self.send_upload(None, note_id, content_type, bytes).await
    }

    async fn send_upload(
        &self,
        cookie: Option<&Cookie<'static>>,
        note_id: i64,
        content_type: &str,
        bytes: &[u8],
    ) -> Reply {
        let mut request = self.client.post("/api/images");
        if let Some(cookie) = cookie {
            request = request.cookie(cookie.clone());
        }
        let response = request
            .header(
                ContentType::new("multipart", "form-data")
                    .with_params(("boundary", BOUNDARY))
            )
            .body(multipart_image(note_id, content_type, bytes))
            .dispatch()
            .await;
        Reply::read(response).await
    }

    pub async fn default_notebook(&self, cookie: &Cookie<'static>) -> i64 {
        let reply = self.get("/api/notebooks", Some(cookie)).await;
        assert_eq!(reply.status, Status::Ok);
        reply.body[0]["id"].as_i64().expect("no default notebook")
    }

    pub async fn create_note(
        &self,
        cookie: &Cookie<'static>,
        notebook: i64,
        content: &str,
    ) -> i64 {
        let reply = self.post(
            &format!("/api/notebooks/{notebook}/notes"),
            Some(cookie),
            json!({ "content": content }),
        ).await;
        assert_eq!(reply.status, Status::Created, "{}", reply.body);
        reply.body["id"].as_i64().expect("no note id")
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        let mut files: Vec<String> = std::fs::read_dir(self.dir.path().join("uploads"))
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        files
    }
}
