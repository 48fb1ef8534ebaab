//! Trading 212 HTTP 请求方法

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::ProviderErrorMapper;

use super::Trading212Client;

impl Trading212Client {
    /// 执行 GET 请求
    ///
    /// `query` pairs are appended in the given order; an empty slice adds no
    /// query string at all.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        HttpUtils::fetch_json(request, self.provider_name(), &format!("GET {url}")).await
    }
}
