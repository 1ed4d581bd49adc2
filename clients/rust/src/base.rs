use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

const ADMIN_SECRET_HEADER: &str = "steward-admin-secret";

pub(crate) struct BaseClient {
    address: String,
    admin_secret: Option<String>,
    token: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum APIError {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}

impl APIError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatusCode(status) => Some(*status),
            _ => None,
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            admin_secret: None,
            token: None,
        }
    }

    pub fn set_admin_secret(&mut self, admin_secret: String) {
        self.admin_secret = Some(admin_secret);
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.address, path);
        let mut builder = Client::new().request(method, &url);

        if let Some(admin_secret) = &self.admin_secret {
            builder = builder.header(ADMIN_SECRET_HEADER, admin_secret.clone());
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError::UnexpectedStatusCode(status));
        }
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match builder.send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), expected_status_code)
            .await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::PUT, path).json(&body),
            expected_status_code,
        )
        .await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::POST, path).json(&body),
            expected_status_code,
        )
        .await
    }
}
