//! Email templates.
//!
//! [`EmailTemplates::compose`] maps one [`SuperfixEvent`] to the emails it
//! should produce. Bodies are Handlebars templates rendered into the same
//! branded frame; `{{value}}` placeholders are HTML-escaped by the engine.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

use crate::bus::SuperfixEvent;
use crate::delivery::email::OutgoingEmail;

const FRAME: &str = "frame";
const APPLICATION_ALERT: &str = "application_alert";
const APPLICATION_ACK: &str = "application_ack";
const HERO_CREDENTIALS: &str = "hero_credentials";
const MISSION_CREATED: &str = "mission_created";
const MISSION_ACCEPTED: &str = "mission_accepted";

// `body` is pre-rendered HTML, hence the triple-stash.
const FRAME_TEMPLATE: &str = r#"<!DOCTYPE html><html><head><style>
    body { font-family: 'Verdana', sans-serif; background-color: #f0f0f0; padding: 20px; }
    .container { max-width: 600px; margin: 0 auto; background-color: #ffffff; border: 4px solid #000; box-shadow: 8px 8px 0 #000; }
    .header { background-color: #DC2626; padding: 25px; text-align: center; border-bottom: 4px solid #000; }
    .header h1 { color: #fff; margin: 0; font-family: 'Arial Black', sans-serif; font-style: italic; text-transform: uppercase; letter-spacing: 2px; font-size: 32px; }
    .content { padding: 30px; color: #000; font-size: 16px; line-height: 1.6; }
    .footer { background-color: #000; color: #FBBF24; padding: 15px; text-align: center; font-size: 12px; font-weight: bold; text-transform: uppercase; }
</style></head><body>
  <div class="container">
    <div class="header"><h1>SUPERFIX</h1></div>
    <div class="content"><h2 style="text-transform: uppercase; border-bottom: 3px dashed #000;">{{title}}</h2>{{{body}}}</div>
    <div class="footer">&copy; SUPERFIX HQ</div>
  </div>
</body></html>"#;

const APPLICATION_ALERT_TEMPLATE: &str = "<p>Name: {{name}}<br>Category: {{category}}<br>Phone: {{phone}}</p>\
<p>Review it in the admin console.</p>";

const APPLICATION_ACK_TEMPLATE: &str =
    "<p>Hi {{name}}, we have received your details. We will be in touch!</p>";

const HERO_CREDENTIALS_TEMPLATE: &str = r#"<p>Hi <strong>{{alias}}</strong>,</p>
<p>You have officially been recruited. Here are your access details:</p>
<ul style="background: #eee; padding: 15px; border: 2px solid #000;">
  <li><strong>Username:</strong> {{username}}</li>
  <li><strong>Password:</strong> {{password}}</li>
</ul>
<p>Sign in to the Hero Portal to get started.</p>"#;

const MISSION_CREATED_TEMPLATE: &str =
    "<p>Client: {{client_name}}<br>Description: {{description}}</p>";

const MISSION_ACCEPTED_TEMPLATE: &str = "<p>{{hero_alias}} has accepted your mission.</p>";

/// Compiled email templates.
pub struct EmailTemplates {
    handlebars: Handlebars<'static>,
}

impl EmailTemplates {
    /// Compile every template. Fails only on template syntax errors.
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        for (name, source) in [
            (FRAME, FRAME_TEMPLATE),
            (APPLICATION_ALERT, APPLICATION_ALERT_TEMPLATE),
            (APPLICATION_ACK, APPLICATION_ACK_TEMPLATE),
            (HERO_CREDENTIALS, HERO_CREDENTIALS_TEMPLATE),
            (MISSION_CREATED, MISSION_CREATED_TEMPLATE),
            (MISSION_ACCEPTED, MISSION_ACCEPTED_TEMPLATE),
        ] {
            handlebars.register_template_string(name, source)?;
        }

        Ok(Self { handlebars })
    }

    /// Wrap `body` (already-safe HTML) in the branded frame under `title`.
    pub fn frame(&self, title: &str, body: &str) -> Result<String, RenderError> {
        self.handlebars
            .render(FRAME, &json!({ "title": title, "body": body }))
    }

    fn email(
        &self,
        to: &str,
        subject: &str,
        title: &str,
        template: &str,
        data: serde_json::Value,
    ) -> Result<OutgoingEmail, RenderError> {
        let body = self.handlebars.render(template, &data)?;
        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: self.frame(title, &body)?,
        })
    }

    /// Emails triggered by `event`. `ops_address` receives staff alerts;
    /// when it is `None` those alerts are skipped.
    pub fn compose(
        &self,
        event: &SuperfixEvent,
        ops_address: Option<&str>,
    ) -> Result<Vec<OutgoingEmail>, RenderError> {
        let mut out = Vec::new();
        match event {
            SuperfixEvent::ApplicationReceived {
                name,
                email: applicant,
                phone,
                category,
                ..
            } => {
                if let Some(ops) = ops_address {
                    out.push(self.email(
                        ops,
                        "New hero application",
                        "New application",
                        APPLICATION_ALERT,
                        json!({ "name": name, "category": category, "phone": phone }),
                    )?);
                }
                out.push(self.email(
                    applicant,
                    "Application received",
                    "Confirmation",
                    APPLICATION_ACK,
                    json!({ "name": name }),
                )?);
            }
            SuperfixEvent::HeroRecruited {
                alias,
                username,
                email: Some(to),
                password,
                ..
            } => {
                out.push(self.email(
                    to,
                    "Welcome to Superfix!",
                    "Application approved",
                    HERO_CREDENTIALS,
                    json!({
                        "alias": alias,
                        "username": username,
                        "password": password.expose(),
                    }),
                )?);
            }
            SuperfixEvent::HeroRecruited { email: None, .. } => {}
            SuperfixEvent::MissionCreated {
                hero_email: Some(to),
                client_name,
                description,
                ..
            } => {
                out.push(self.email(
                    to,
                    "New mission",
                    "Alert",
                    MISSION_CREATED,
                    json!({ "client_name": client_name, "description": description }),
                )?);
            }
            SuperfixEvent::MissionCreated { hero_email: None, .. } => {}
            SuperfixEvent::MissionAccepted {
                hero_alias,
                client_email: Some(to),
                ..
            } => {
                out.push(self.email(
                    to,
                    "Mission accepted",
                    "Your hero is on the way",
                    MISSION_ACCEPTED,
                    json!({ "hero_alias": hero_alias }),
                )?);
            }
            SuperfixEvent::MissionAccepted { client_email: None, .. } => {}
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Credential;

    fn templates() -> EmailTemplates {
        EmailTemplates::new().unwrap()
    }

    fn application() -> SuperfixEvent {
        SuperfixEvent::ApplicationReceived {
            application_id: 1,
            name: "Ana".into(),
            email: "ana@x.ro".into(),
            phone: "0711".into(),
            category: "Electrician".into(),
        }
    }

    #[test]
    fn test_application_alerts_ops_and_acknowledges_applicant() {
        let emails = templates()
            .compose(&application(), Some("ops@superfix.ro"))
            .unwrap();
        let recipients: Vec<_> = emails.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(recipients, vec!["ops@superfix.ro", "ana@x.ro"]);
        assert!(emails[0].html_body.contains("Electrician"));
        assert!(emails[1].html_body.contains("Hi Ana"));
    }

    #[test]
    fn test_application_without_ops_inbox_only_acknowledges() {
        let emails = templates().compose(&application(), None).unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "ana@x.ro");
    }

    #[test]
    fn test_recruitment_email_carries_credentials() {
        let event = SuperfixEvent::HeroRecruited {
            hero_id: 3,
            alias: "Voltaj".into(),
            username: "voltaj".into(),
            email: Some("ion@superfix.ro".into()),
            password: Credential::new("Hero123!"),
        };
        let emails = templates().compose(&event, None).unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails[0].html_body.contains("voltaj"));
        assert!(emails[0].html_body.contains("Hero123!"));
    }

    #[test]
    fn test_events_without_recipient_produce_nothing() {
        let recruited = SuperfixEvent::HeroRecruited {
            hero_id: 3,
            alias: "Voltaj".into(),
            username: "voltaj".into(),
            email: None,
            password: Credential::new("x"),
        };
        let accepted = SuperfixEvent::MissionAccepted {
            mission_id: 1,
            hero_alias: "Voltaj".into(),
            client_email: None,
        };
        let templates = templates();
        assert!(templates
            .compose(&recruited, Some("ops@superfix.ro"))
            .unwrap()
            .is_empty());
        assert!(templates
            .compose(&accepted, Some("ops@superfix.ro"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_user_text_is_escaped() {
        let event = SuperfixEvent::MissionCreated {
            mission_id: 1,
            hero_id: 2,
            hero_email: Some("aqua@superfix.ro".into()),
            client_name: "<script>alert(1)</script>".into(),
            description: "Tom & Jerry".into(),
        };
        let emails = templates().compose(&event, None).unwrap();
        let body = &emails[0].html_body;
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_frame_escapes_title_but_not_body() {
        let html = templates().frame("A & B", "<p>Body</p>").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(">A &amp; B</h2><p>Body</p>"));
    }
}
