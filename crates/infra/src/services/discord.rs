use super::INotifier;
use crate::config::DiscordSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

// https://discord.com/developers/docs/resources/user#create-dm

#[derive(Debug, Serialize)]
struct CreateDmRequest<'a> {
    recipient_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    content: &'a str,
}

/// Sends direct messages as the bot user through the Discord REST API
pub struct DiscordNotifier {
    client: Client,
    settings: DiscordSettings,
}

impl DiscordNotifier {
    pub fn new(settings: DiscordSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_base_url.trim_end_matches('/'), path)
    }

    async fn open_dm_channel(&self, user_id: &str) -> anyhow::Result<String> {
        let res = self
            .client
            .post(self.url("users/@me/channels"))
            .header("authorization", format!("Bot {}", self.settings.bot_token))
            .json(&CreateDmRequest {
                recipient_id: user_id,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<DmChannel>().await?.id)
    }
}

#[async_trait::async_trait]
impl INotifier for DiscordNotifier {
    async fn send_direct_message(&self, user_id: &str, text: &str) -> anyhow::Result<()> {
        let channel_id = self.open_dm_channel(user_id).await.map_err(|e| {
            error!(
                "Unable to open a direct message channel to user: {}. Error message: {:?}",
                user_id, e
            );
            e
        })?;

        self.client
            .post(self.url(&format!("channels/{}/messages", channel_id)))
            .header("authorization", format!("Bot {}", self.settings.bot_token))
            .json(&CreateMessageRequest { content: text })
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| {
                error!(
                    "Unable to send a direct message to user: {}. Error message: {:?}",
                    user_id, e
                );
                anyhow::Error::new(e)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier(server: &MockServer) -> DiscordNotifier {
        DiscordNotifier::new(DiscordSettings {
            bot_token: "token".into(),
            api_base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn sends_message_to_dm_channel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/@me/channels"))
            .and(header("authorization", "Bot token"))
            .and(body_json(json!({ "recipient_id": "42" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "dm-1", "type": 1 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/channels/dm-1/messages"))
            .and(body_json(json!({ "content": "Hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "message-1" })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(notifier(&server).send_direct_message("42", "Hello").await.is_ok());
    }

    #[tokio::test]
    async fn failing_channel_creation_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/@me/channels"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/channels/dm-1/messages"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(notifier(&server).send_direct_message("42", "Hello").await.is_err());
    }
}
