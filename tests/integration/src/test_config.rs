//! Environment-style configuration driving a full invocation.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use lightsail_cdn_client::{
        CredentialsStatus, LightsailClient, TargetConfig, credentials_from_config,
    };
    use lightsail_cdn_core::LightsailCdnConfig;

    use crate::{MockBehavior, MockLightsail, TEST_ACCESS_KEY, TEST_SECRET_KEY};

    fn config_for(mock: &MockLightsail, distribution: &str) -> LightsailCdnConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            ("AWS_ACCESS_KEY_ID", TEST_ACCESS_KEY.to_owned()),
            ("AWS_SECRET_ACCESS_KEY", TEST_SECRET_KEY.to_owned()),
            ("AWS_DEFAULT_REGION", "eu-central-1".to_owned()),
            ("LIGHTSAIL_DISTRIBUTION_NAME", distribution.to_owned()),
            ("LIGHTSAIL_ENDPOINT_URL", mock.url()),
            ("LIGHTSAIL_TIMEOUT_SECS", "5".to_owned()),
        ]);
        LightsailCdnConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_should_invoke_from_loaded_config() {
        let mock = MockLightsail::start(MockBehavior::verify_test_keys())
            .await
            .unwrap();
        let config = config_for(&mock, "blog-cdn");

        let client = LightsailClient::from_config(&config).unwrap();
        let result = client
            .invoke(
                &credentials_from_config(&config),
                &TargetConfig::from_config(&config),
            )
            .await;

        assert!(result.success, "unexpected failure: {}", result.message);

        let requests = mock.requests();
        let authorization = requests[0].header("authorization").unwrap();
        assert!(authorization.contains("/eu-central-1/lightsail/aws4_request"));
    }

    #[tokio::test]
    async fn test_should_report_unconfigured_distribution() {
        let mock = MockLightsail::start(MockBehavior::verify_test_keys())
            .await
            .unwrap();
        let config = config_for(&mock, "");

        let status = CredentialsStatus::inspect(
            &credentials_from_config(&config),
            &TargetConfig::from_config(&config),
        );
        assert!(status.access_key && status.secret_key);
        assert!(!status.configured);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["region"], "eu-central-1");
        assert!(!json.to_string().contains(TEST_SECRET_KEY));

        let client = LightsailClient::from_config(&config).unwrap();
        let result = client
            .invoke(
                &credentials_from_config(&config),
                &TargetConfig::from_config(&config),
            )
            .await;
        assert_eq!(result.message, "missing credentials");
        assert!(mock.requests().is_empty());
    }
}
