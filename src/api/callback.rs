use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{management::TokenManager, types::CallbackParams, warning};

/// Spotify puts the token in the URL fragment, which browsers never send to
/// a server. This page forwards it to [`token`] as a query string.
const FORWARD_FRAGMENT_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Connecting to Spotify...</title></head>
  <body>
    <h2>Connecting to Spotify...</h2>
    <p>You will be redirected back automatically.</p>
    <script>
      var params = window.location.hash.substring(1) || window.location.search.substring(1);
      window.location.replace('/token?' + params);
    </script>
  </body>
</html>"#;

pub async fn callback() -> Html<&'static str> {
    Html(FORWARD_FRAGMENT_PAGE)
}

pub async fn token(
    Query(params): Query<HashMap<String, String>>,
    Extension(tokens): Extension<Arc<TokenManager>>,
) -> Response {
    let field = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();
    let params = CallbackParams {
        access_token: field("access_token"),
        state: field("state"),
        error: field("error"),
    };

    match tokens.on_callback_received(params).await {
        Ok(Some(return_url)) => Redirect::to(&return_url).into_response(),
        Ok(None) => {
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>").into_response()
        }
        Err(e) => {
            warning!("Callback rejected. Err: {}", e);
            Html("<h4>Login failed.</h4>").into_response()
        }
    }
}
