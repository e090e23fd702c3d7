//! API documentation: the embedded OpenAPI document and two HTML viewers.

use actix_web::HttpResponse;

const OPENAPI_YAML: &str = include_str!("../../openapi.yaml");

const SWAGGER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>Swagger UI</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({
          url: '/openapi.yaml',
          dom_id: '#swagger-ui',
        });
      };
    </script>
  </body>
</html>"#;

const REDOC_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>ReDoc</title>
    <style>
      body { margin: 0; padding: 0; }
      #redoc-container { height: 100vh; }
    </style>
  </head>
  <body>
    <div id="redoc-container"></div>
    <script src="https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js"></script>
    <script>
      document.addEventListener('DOMContentLoaded', function () {
        if (window.Redoc) {
          window.Redoc.init('/openapi.yaml', {}, document.getElementById('redoc-container'));
        }
      });
    </script>
  </body>
</html>"#;

/// GET /openapi.yaml
pub async fn openapi_yaml() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/yaml")
        .body(OPENAPI_YAML)
}

/// GET /docs/swagger
pub async fn swagger_ui() -> HttpResponse {
    html(SWAGGER_HTML)
}

/// GET /docs/redoc
pub async fn redoc() -> HttpResponse {
    html(REDOC_HTML)
}

fn html(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}
