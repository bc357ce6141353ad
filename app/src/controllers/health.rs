use tally::{json_response, Request, Response, DB};

pub async fn show(_req: Request) -> Response {
    let database = match DB::connection() {
        Ok(conn) => match conn.inner().ping().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::warn!(error = %e, "database ping failed");
                "down"
            }
        },
        Err(_) => "unconfigured",
    };

    json_response!({
        "status": "ok",
        "database": database
    })
}
