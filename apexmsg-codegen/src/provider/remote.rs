//! Schema provider that logs in to the platform
//!
//! Login goes through the partner SOAP `login` call (username + password, as
//! stored in `force.json`); the returned session id is then used as a bearer
//! token against the REST describe endpoints:
//!
//! ```text
//! POST {url}/services/Soap/u/{apiVersion}                    login
//! GET  {instance}/services/data/v{apiVersion}/sobjects          describe-global
//! GET  {instance}/services/data/v{apiVersion}/sobjects/{name}/describe
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use super::{check_object_name, SchemaProvider, SchemaSession};
use crate::config::{defaults, ForceConfig};
use crate::error::{CodegenError, Result};
use crate::parser::{
    parse_global_describe, parse_object_describe, ObjectDescribe, ObjectTypeSummary,
};

const SOAP_ACTION: &str = "SOAPAction";
const SOAP_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Connects to the org named by `force.json`
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    timeout: Duration,
    use_system_proxy: bool,
}

/// A logged-in REST session
#[derive(Debug, Clone)]
pub struct RemoteSession {
    client: Client,
    instance_url: String,
    session_id: String,
    api_version: String,
}

impl Default for RemoteProvider {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            use_system_proxy: true,
        }
    }
}

impl RemoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore `HTTP_PROXY` / `HTTPS_PROXY` from the environment
    pub fn no_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    fn client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("apexmsg-codegen/", env!("CARGO_PKG_VERSION")));
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(builder.build()?)
    }
}

impl SchemaProvider for RemoteProvider {
    type Session = RemoteSession;

    fn connect(&self, config: &ForceConfig) -> Result<RemoteSession> {
        let client = self.client()?;
        let api_version = normalize_api_version(&config.api_version);
        let endpoint = login_endpoint(&config.url, &api_version);
        debug!("Logging in to {} as {}", endpoint, config.username);

        let response = client
            .post(&endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header(SOAP_ACTION, "login")
            .body(login_envelope(&config.username, &config.password))
            .send()?;
        let status = response.status();
        let body = response.text()?;

        let login = parse_login_response(&body).map_err(|e| match e {
            CodegenError::ConnectionError(msg) if !status.is_success() => {
                CodegenError::ConnectionError(format!("login failed ({}): {}", status, msg))
            }
            other => other,
        })?;

        let instance_url = instance_url(&login.server_url).ok_or_else(|| {
            CodegenError::ConnectionError(format!(
                "login returned an unexpected server URL: {}",
                login.server_url
            ))
        })?;
        info!("Logged in as {} ({})", config.username, instance_url);

        Ok(RemoteSession {
            client,
            instance_url,
            session_id: login.session_id,
            api_version,
        })
    }
}

impl RemoteSession {
    fn data_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    fn get(&self, path: &str) -> Result<Response> {
        let url = self.data_url(path);
        debug!("GET {}", url);
        Ok(self
            .client
            .get(&url)
            .bearer_auth(&self.session_id)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()?)
    }
}

impl SchemaSession for RemoteSession {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeSummary>> {
        let response = self.get("sobjects")?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(CodegenError::ConnectionError(format!(
                "describe-global failed ({}): {}",
                status,
                rest_error_message(&body)
            )));
        }
        parse_global_describe(&body)
    }

    fn describe(&self, object_type: &str) -> Result<ObjectDescribe> {
        check_object_name(object_type)?;

        let response = self.get(&format!("sobjects/{}/describe", object_type))?;
        let status = response.status();
        let body = response.text()?;
        match status {
            s if s.is_success() => parse_object_describe(&body),
            StatusCode::NOT_FOUND => Err(CodegenError::UnknownObjectType(format!(
                "{}: {}",
                object_type,
                rest_error_message(&body)
            ))),
            s => Err(CodegenError::ConnectionError(format!(
                "describe {} failed ({}): {}",
                object_type,
                s,
                rest_error_message(&body)
            ))),
        }
    }
}

/// Session details from a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub session_id: String,
    pub server_url: String,
}

/// `{url}/services/Soap/u/{version}`; a bare host gets `https://`
pub fn login_endpoint(url: &str, api_version: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    let base = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    format!("{}/services/Soap/u/{}", base, api_version)
}

/// "v58.0" and "58.0" both become "58.0"
pub fn normalize_api_version(api_version: &str) -> String {
    let version = api_version.trim();
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
        .to_string()
}

/// SOAP envelope for the partner `login` call
pub fn login_envelope(username: &str, password: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<env:Envelope xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\"",
            " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"",
            " xmlns:env=\"http://schemas.xmlsoap.org/soap/envelope/\">\n",
            "  <env:Body>\n",
            "    <n1:login xmlns:n1=\"urn:partner.soap.sforce.com\">\n",
            "      <n1:username>{}</n1:username>\n",
            "      <n1:password>{}</n1:password>\n",
            "    </n1:login>\n",
            "  </env:Body>\n",
            "</env:Envelope>\n"
        ),
        escape_xml(username),
        escape_xml(password)
    )
}

/// Pull the session id and server URL out of a login response, or the
/// fault string out of a SOAP fault
pub fn parse_login_response(body: &str) -> Result<LoginResult> {
    if let Some(fault) = element_text(body, "faultstring") {
        return Err(CodegenError::ConnectionError(fault));
    }

    match (
        element_text(body, "sessionId"),
        element_text(body, "serverUrl"),
    ) {
        (Some(session_id), Some(server_url)) => Ok(LoginResult {
            session_id,
            server_url,
        }),
        _ => Err(CodegenError::ConnectionError(
            "login response carried no session".into(),
        )),
    }
}

/// Scheme and host of the SOAP server URL, e.g.
/// `https://na1.salesforce.com/services/Soap/u/42.0/00D...` -> `https://na1.salesforce.com`
pub fn instance_url(server_url: &str) -> Option<String> {
    let pos = server_url.find("/services/")?;
    let base = &server_url[..pos];
    if base.contains("://") {
        Some(base.to_string())
    } else {
        None
    }
}

/// First error message of a REST error body (`[{"message": ..., "errorCode": ...}]`)
fn rest_error_message(body: &str) -> String {
    let first = serde_json::from_str::<Value>(body).ok().and_then(|v| match v {
        Value::Array(mut errors) if !errors.is_empty() => Some(errors.swap_remove(0)),
        Value::Object(_) => Some(v),
        _ => None,
    });

    match first {
        Some(error) => {
            let code = error["errorCode"].as_str().unwrap_or("ERROR");
            let message = error["message"].as_str().unwrap_or_default();
            format!("{}: {}", code, message)
        }
        None => body.trim().to_string(),
    }
}

/// Text of the first `<tag>` element, with or without a namespace prefix
fn element_text(xml: &str, tag: &str) -> Option<String> {
    let open = [format!("<{}>", tag), format!(":{}>", tag)]
        .iter()
        .filter_map(|needle| xml.find(needle.as_str()).map(|pos| pos + needle.len()))
        .min()?;
    let rest = &xml[open..];
    let end = rest.find("</")?;
    Some(unescape_xml(&rest[..end]))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
