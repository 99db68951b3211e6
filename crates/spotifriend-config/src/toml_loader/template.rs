//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Spotifriend Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# token_url = "https://open.spotify.com/get_access_token?reason=transport&productType=web_player"
# buddylist_url = "https://guc-spclient.spotify.com/presence-view/v1/buddylist"
# web_base_url = "https://open.spotify.com"

[polling]
# interval_secs = 30     # 5-3600
# login_settle_ms = 1000 # 0-10000

[notifications]
# ttl_ms = 3000          # 500-60000

[reachability]
# enabled = true
# probe_host = "open.spotify.com"
# probe_port = 443
# interval_secs = 10     # 1-300
# timeout_secs = 5       # 1-60

[engine]
# state_model = "first_launch_aware"   # first_launch_aware, collapsed

[store]
# path = ""              # empty = platform data directory
# cookie_key = "spDcCookie"
# legacy_cookie_key = "group.app.zane.spotifriend.spDcCookie"

[widget]
# refresh_minutes = 15   # 1-1440
# retry_minutes = 5      # 1-1440
# family = "medium"      # medium, large

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
