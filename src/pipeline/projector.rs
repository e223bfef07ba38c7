//! # 配置投影
//!
//! 将数据源投影为管道配置片段。输出只取决于数据源字段与启动时冻结的配置。

use super::catalog::{
    FACEBOOK_COLLECTIONS, FACEBOOK_SOURCE_TYPE, GOOGLE_ADS_COLLECTIONS, GOOGLE_ADS_SCHEDULE,
    GOOGLE_ADS_SOURCE_TYPE,
};
use super::fragment::{
    ConfigFragment, FacebookCredentials, FragmentCredentials, GoogleAdsCredentials, GoogleAuth,
    destination_for,
};
use crate::config::GoogleOAuthConfig;
use crate::sources::{FacebookConfig, GoogleAdsConfig, Source, SourceConfig};

/// 配置投影器
#[derive(Debug, Clone)]
pub struct ConfigProjector {
    google_client_id: String,
    google_client_secret: String,
}

impl ConfigProjector {
    #[must_use]
    pub fn new(google: &GoogleOAuthConfig) -> Self {
        Self {
            google_client_id: google.client_id.clone(),
            google_client_secret: google.client_secret.clone(),
        }
    }

    /// 片段键：`{name}_{type}_{projectId}`
    #[must_use]
    pub fn fragment_key(source: &Source) -> String {
        format!("{}_{}_{}", source.name, source.kind(), source.project_id)
    }

    /// 投影数据源，Call Picker 数据源不参与投影
    #[must_use]
    pub fn project(&self, source: &Source) -> Option<(String, ConfigFragment)> {
        let fragment = match &source.config {
            SourceConfig::Facebook(config) => Self::facebook(&source.project_id, config),
            SourceConfig::GoogleAds(config) => self.google_ads(&source.project_id, config),
            SourceConfig::CallPicker(_) => return None,
        };
        Some((Self::fragment_key(source), fragment))
    }

    fn facebook(project_id: &str, config: &FacebookConfig) -> ConfigFragment {
        ConfigFragment {
            kind: FACEBOOK_SOURCE_TYPE,
            destinations: vec![destination_for(project_id)],
            config: FragmentCredentials::Facebook(FacebookCredentials {
                account_id: config.account_id.clone(),
                access_token: config.access_token.clone(),
            }),
            schedule: None,
            collections: FACEBOOK_COLLECTIONS,
        }
    }

    fn google_ads(&self, project_id: &str, config: &GoogleAdsConfig) -> ConfigFragment {
        ConfigFragment {
            kind: GOOGLE_ADS_SOURCE_TYPE,
            destinations: vec![destination_for(project_id)],
            config: FragmentCredentials::GoogleAds(GoogleAdsCredentials {
                customer_id: config.customer_id.clone(),
                manager_customer_id: config.manager_customer_id.clone().unwrap_or_default(),
                auth: GoogleAuth {
                    kind: "OAuth",
                    client_id: self.google_client_id.clone(),
                    client_secret: self.google_client_secret.clone(),
                    refresh_token: config.refresh_token.clone(),
                },
            }),
            schedule: Some(GOOGLE_ADS_SCHEDULE),
            collections: GOOGLE_ADS_COLLECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{CallPickerConfig, PhoneNumber};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn projector() -> ConfigProjector {
        ConfigProjector::new(&GoogleOAuthConfig {
            client_id: "ga-client".to_string(),
            client_secret: "ga-secret".to_string(),
            ..GoogleOAuthConfig::default()
        })
    }

    fn source(name: &str, config: SourceConfig) -> Source {
        Source {
            id: "V1StGXR8_Z".to_string(),
            name: name.to_string(),
            project_id: "proj1".to_string(),
            config,
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_facebook_fragment() {
        let src = source(
            "Acme",
            SourceConfig::Facebook(FacebookConfig {
                account_id: "act_42".to_string(),
                access_token: "long-lived".to_string(),
            }),
        );

        let (key, fragment) = projector().project(&src).unwrap();
        assert_eq!(key, "Acme_fb_proj1");

        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["type"], "facebook_marketing");
        assert_eq!(value["destinations"], json!(["postgres_proj1"]));
        assert_eq!(
            value["config"],
            json!({"account_id": "act_42", "access_token": "long-lived"})
        );
        assert!(value.get("schedule").is_none());
        assert_eq!(value["collections"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_google_fragment_embeds_process_credentials() {
        let src = source(
            "Acme Ads",
            SourceConfig::GoogleAds(GoogleAdsConfig {
                refresh_token: "1//0g".to_string(),
                customer_id: "123".to_string(),
                manager_customer_id: Some("999".to_string()),
            }),
        );

        let (key, fragment) = projector().project(&src).unwrap();
        assert_eq!(key, "Acme Ads_ga_proj1");

        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["type"], "google_ads");
        assert_eq!(value["schedule"], "*/60 * * * *");
        assert_eq!(
            value["config"],
            json!({
                "customer_id": "123",
                "manager_customer_id": "999",
                "auth": {
                    "type": "OAuth",
                    "client_id": "ga-client",
                    "client_secret": "ga-secret",
                    "refresh_token": "1//0g"
                }
            })
        );
        let names: Vec<&str> = value["collections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "accessible_bidding_strategy",
                "account_budget",
                "account_budget_proposal"
            ]
        );
    }

    #[test]
    fn test_missing_manager_id_is_empty_string() {
        let src = source(
            "Acme Ads",
            SourceConfig::GoogleAds(GoogleAdsConfig {
                refresh_token: "rt".to_string(),
                customer_id: "123".to_string(),
                manager_customer_id: None,
            }),
        );

        let (_, fragment) = projector().project(&src).unwrap();
        let value = serde_json::to_value(&fragment).unwrap();
        assert_eq!(value["config"]["manager_customer_id"], json!(""));
    }

    #[test]
    fn test_callpicker_is_skipped() {
        let src = source(
            "Acme",
            SourceConfig::CallPicker(CallPickerConfig {
                numbers: vec![PhoneNumber {
                    name: "main".to_string(),
                    number: "+15551234567".to_string(),
                }],
            }),
        );
        assert!(projector().project(&src).is_none());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let src = source(
            "Acme",
            SourceConfig::GoogleAds(GoogleAdsConfig {
                refresh_token: "rt".to_string(),
                customer_id: "123".to_string(),
                manager_customer_id: None,
            }),
        );
        let projector = projector();

        let first = serde_json::to_vec(&projector.project(&src)).unwrap();
        let second = serde_json::to_vec(&projector.project(&src)).unwrap();
        assert_eq!(first, second);
    }
}
