use std::time::Duration;

use async_trait::async_trait;
use panel_effects::*;
use parking_lot::Mutex;
use serde_json::{json, Value};

const ENDPOINT: &str = "http://10.0.0.5:16021/api/v1/tok/effects";

#[derive(Debug, Clone, PartialEq)]
enum Request {
    Get(String),
    Put(String, Value),
}

/// Replies to every request with the same canned response, or with a
/// transport failure when `reply` is `None`
struct FakeTransport {
    reply: Option<Response>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Some(Response {
                status,
                body: body.as_bytes().to_vec(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn reply(&self) -> Result<Response> {
        self.reply.clone().ok_or_else(|| {
            Error::Transport(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        })
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<Response> {
        self.requests.lock().push(Request::Get(url.to_owned()));
        self.reply()
    }

    async fn put(&self, url: &str, body: Vec<u8>) -> Result<Response> {
        let body = serde_json::from_slice(&body).expect("request body is JSON");
        self.requests.lock().push(Request::Put(url.to_owned(), body));
        self.reply()
    }
}

fn client(transport: FakeTransport) -> EffectsClient<FakeTransport> {
    let config = DeviceConfig::new("http://10.0.0.5:16021/api/v1", "tok").unwrap();
    EffectsClient::with_transport(&config, transport)
}

fn requests(effects: &EffectsClient<FakeTransport>) -> Vec<Request> {
    effects.transport().requests.lock().clone()
}

fn put(body: Value) -> Request {
    Request::Put(ENDPOINT.to_owned(), body)
}

/// Runs every operation once, discarding successful values
async fn run_all(effects: &EffectsClient<FakeTransport>) -> Vec<(&'static str, Result<()>)> {
    vec![
        ("list", effects.list().await.map(|_| ())),
        ("get", effects.get().await.map(|_| ())),
        ("select", effects.select("Flow").await),
        ("fetch_effect", effects.fetch_effect("Flow").await.map(|_| ())),
        ("fetch_all_effects", effects.fetch_all_effects().await.map(|_| ())),
        ("rename", effects.rename("Flow", "Glow").await),
        ("add_or_update", effects.add_or_update(EffectData::new("Flow"), "Flow").await),
        ("delete", effects.delete("Flow").await),
        ("display", effects.display("0", false).await),
        (
            "display_temporary",
            effects.display_temporary("Flow", Duration::from_secs(5)).await,
        ),
        ("raw_write", effects.raw_write(json!({"command": "x"})).await),
    ]
}

#[tokio::test]
async fn list_returns_names_in_device_order() {
    let effects = client(FakeTransport::replying(200, r#"["Flow","Rainbow"]"#));

    assert_eq!(effects.list().await.unwrap(), ["Flow", "Rainbow"]);
    assert_eq!(
        requests(&effects),
        [Request::Get(format!("{ENDPOINT}/effectsList"))]
    );
}

#[tokio::test]
async fn get_returns_active_effect() {
    let effects = client(FakeTransport::replying(200, r#""Rainbow""#));

    assert_eq!(effects.get().await.unwrap(), "Rainbow");
    assert_eq!(requests(&effects), [Request::Get(format!("{ENDPOINT}/select"))]);
}

#[tokio::test]
async fn select_succeeds_on_no_content() {
    let effects = client(FakeTransport::replying(204, ""));

    effects.select("Flow").await.unwrap();
    assert_eq!(requests(&effects), [put(json!({"select": "Flow"}))]);
}

#[tokio::test]
async fn fetch_effect_decodes_definition() {
    let body = r#"{"animName": "Flow", "animType": "custom", "animData": "0", "loop": true}"#;
    let effects = client(FakeTransport::replying(200, body));

    let effect = effects.fetch_effect("Flow").await.unwrap();
    assert_eq!(effect.name, "Flow");
    assert_eq!(effect.anim_type.as_deref(), Some("custom"));
    assert_eq!(effect.looped, Some(true));
    assert_eq!(
        requests(&effects),
        [put(json!({"write": {"command": "request", "animName": "Flow"}}))]
    );
}

#[tokio::test]
async fn fetch_effect_missing_is_effect_not_found() {
    let effects = client(FakeTransport::replying(404, ""));

    assert!(matches!(
        effects.fetch_effect("Flow").await,
        Err(Error::EffectNotFound)
    ));
}

#[tokio::test]
async fn fetch_all_unwraps_animations() {
    let body = r#"{"animations": [{"animName": "Flow"}, {"animName": "Rainbow"}]}"#;
    let effects = client(FakeTransport::replying(200, body));

    let names: Vec<_> = effects
        .fetch_all_effects()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Flow", "Rainbow"]);
    assert_eq!(
        requests(&effects),
        [put(json!({"write": {"command": "requestAll"}}))]
    );
}

#[tokio::test]
async fn rename_and_delete_payloads() {
    let effects = client(FakeTransport::replying(204, ""));

    effects.rename("Flow", "Glow").await.unwrap();
    effects.delete("Glow").await.unwrap();
    assert_eq!(
        requests(&effects),
        [
            put(json!({"write": {"command": "rename", "animName": "Flow", "newName": "Glow"}})),
            put(json!({"write": {"command": "delete", "animName": "Glow"}})),
        ]
    );
}

#[tokio::test]
async fn add_or_update_forces_command_and_name() {
    let effects = client(FakeTransport::replying(204, ""));

    let mut data = EffectData::new("Caller Name");
    data.command = Some("delete".into());
    data.anim_type = Some("plugin".into());
    data.palette = vec![PaletteColor {
        hue: 30,
        saturation: 100,
        brightness: 50,
        probability: 1.0,
    }];
    data.plugin_options = vec![PluginOption::new("transTime", 10i64)];

    effects.add_or_update(data, "Sunset").await.unwrap();
    assert_eq!(
        requests(&effects),
        [put(json!({"write": {
            "command": "add",
            "animName": "Sunset",
            "animType": "plugin",
            "palette": [{"hue": 30, "saturation": 100, "brightness": 50, "probability": 1.0}],
            "pluginOptions": [{"name": "transTime", "value": 10}]
        }}))]
    );
}

#[tokio::test]
async fn display_animation_streams_encoded_frames() {
    let effects = client(FakeTransport::replying(204, ""));
    let animation = StreamAnimation::new()
        .with_panel(1, vec![Frame::new(255, 0, 0, 5)])
        .with_panel(2, vec![Frame::new(0, 255, 0, 3), Frame::new(0, 0, 255, 7)]);

    effects.display_animation(&animation, true).await.unwrap();
    assert_eq!(
        requests(&effects),
        [put(json!({"write": {
            "command": "display",
            "animType": "custom",
            "colorType": "RGB",
            "animData": "2 1 1 255 0 0 0 5 2 2 0 255 0 0 3 0 0 255 0 7",
            "loop": true
        }}))]
    );
}

#[tokio::test]
async fn display_temporary_sends_seconds() {
    let effects = client(FakeTransport::replying(204, ""));

    effects
        .display_temporary("Flow", Duration::from_secs(90))
        .await
        .unwrap();
    assert_eq!(
        requests(&effects),
        [put(json!({"write": {"command": "displayTemp", "duration": 90, "animName": "Flow"}}))]
    );
}

#[tokio::test]
async fn raw_write_is_verbatim() {
    let effects = client(FakeTransport::replying(204, ""));
    let payload = json!({"command": "displayTemp", "duration": 3, "animName": "Flow", "extra": [1, 2]});

    effects.raw_write(payload.clone()).await.unwrap();
    assert_eq!(requests(&effects), [put(json!({ "write": payload }))]);
}

#[tokio::test]
async fn every_operation_maps_unauthorized() {
    let effects = client(FakeTransport::replying(401, r#"["Flow"]"#));

    for (operation, result) in run_all(&effects).await {
        assert!(matches!(result, Err(Error::Unauthorized)), "{operation}");
    }
}

#[tokio::test]
async fn not_found_is_never_success() {
    let effects = client(FakeTransport::replying(404, ""));

    for (operation, result) in run_all(&effects).await {
        let error = result.expect_err(operation);
        assert!(error.is_not_found(), "{operation}: {error}");

        let expected_effect = !matches!(operation, "list" | "get" | "display" | "raw_write");
        assert_eq!(
            matches!(error, Error::EffectNotFound),
            expected_effect,
            "{operation}"
        );
    }
}

#[tokio::test]
async fn mutations_require_no_content() {
    let effects = client(FakeTransport::replying(200, ""));

    assert!(matches!(
        effects.select("Flow").await,
        Err(Error::UnexpectedResponse(200))
    ));
    assert!(matches!(
        effects.delete("Flow").await,
        Err(Error::UnexpectedResponse(200))
    ));
    assert!(matches!(
        effects.display("0", true).await,
        Err(Error::UnexpectedResponse(200))
    ));
}

#[tokio::test]
async fn reads_require_ok() {
    let effects = client(FakeTransport::replying(204, ""));

    assert!(matches!(effects.list().await, Err(Error::UnexpectedResponse(204))));
    assert!(matches!(
        effects.fetch_effect("Flow").await,
        Err(Error::UnexpectedResponse(204))
    ));
}

#[tokio::test]
async fn server_errors_are_unexpected() {
    let effects = client(FakeTransport::replying(500, "oops"));

    for (operation, result) in run_all(&effects).await {
        assert!(
            matches!(result, Err(Error::UnexpectedResponse(500))),
            "{operation}"
        );
    }
}

#[tokio::test]
async fn wrong_body_shape_is_malformed() {
    let effects = client(FakeTransport::replying(200, r#"{"effects": ["Flow"]}"#));

    assert!(matches!(effects.list().await, Err(Error::MalformedResponse(_))));
    assert!(matches!(effects.get().await, Err(Error::MalformedResponse(_))));
    assert!(matches!(
        effects.fetch_effect("Flow").await,
        Err(Error::MalformedResponse(_))
    ));
    assert!(matches!(
        effects.fetch_all_effects().await,
        Err(Error::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn transport_failures_propagate() {
    let effects = client(FakeTransport::unreachable());

    for (operation, result) in run_all(&effects).await {
        assert!(matches!(result, Err(Error::Transport(_))), "{operation}");
    }
    assert_eq!(requests(&effects).len(), 11);
}

#[tokio::test]
async fn concurrent_callers_share_one_client() {
    let effects = client(FakeTransport::replying(204, ""));

    let names: Vec<String> = (0..16).map(|i| format!("Effect {i}")).collect();
    let results = futures::future::join_all(names.iter().map(|name| effects.select(name))).await;

    assert!(results.iter().all(|r| r.is_ok()));
    let mut sent: Vec<_> = requests(&effects)
        .into_iter()
        .map(|request| match request {
            Request::Put(_, body) => body["select"].as_str().unwrap().to_owned(),
            Request::Get(url) => panic!("unexpected GET {url}"),
        })
        .collect();
    sent.sort();
    let mut expected = names.clone();
    expected.sort();
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn http_transport_errors_hide_the_token() {
    let config = DeviceConfig::new("http://127.0.0.1:9/api/v1", "SECRETTOKEN").unwrap();
    let transport = HttpTransport::with_timeout(Duration::from_secs(2)).unwrap();
    let effects = EffectsClient::with_transport(&config, transport);

    let error = effects.list().await.expect_err("nothing listens on the discard port");
    assert!(matches!(error, Error::Transport(_)));
    assert!(!error.to_string().contains("SECRETTOKEN"), "{error}");
}
