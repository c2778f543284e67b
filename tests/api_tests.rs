use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use cinedex::config::Config;
use cinedex::state::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

const CSV_HEADER: &str = "budget,homepage,original_language,original_title,overview,release_date,revenue,runtime,status,title,vote_average,vote_count,production_company_id,genre_id,languages";

const BOUNDARY: &str = "cinedex-test-boundary";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // One pooled connection, so every request hits the same in-memory db.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = AppState::new(config)
        .await
        .expect("Failed to create app state");
    cinedex::api::router(Arc::new(state))
}

fn upload_request(field_name: &str, filename: Option<&str>, content: &str) -> Request<Body> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field_name}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field_name}\""),
    };

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: text/csv\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/upload_csv")
        .header(
            header::CONTENT_TYPE,
            format!("{}; boundary={BOUNDARY}", mime::MULTIPART_FORM_DATA),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn upload_csv(app: &Router, csv: &str) {
    let response = app
        .clone()
        .oneshot(upload_request("file", Some("movies.csv"), csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "CSV data uploaded successfully!");
}

async fn get_movies(app: &Router, query: &str) -> serde_json::Value {
    let uri = if query.is_empty() {
        "/movies".to_string()
    } else {
        format!("/movies?{query}")
    };

    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Twelve movies, written out of release order so listings prove the
/// store is sorting rather than replaying insertion order.
fn sample_csv() -> String {
    let rows: &[(&str, &str, &str, &str, &str)] = &[
        ("1999-03-31", "en", "Released", "The Matrix", "8.7"),
        ("1994-07-06", "en", "Released", "Forrest Gump", "8.8"),
        ("2003-12-17", "en", "Released", "Return of the King", "8.9"),
        ("1995-12-15", "fr", "Released", "The City of Lost Children", "7.0"),
        ("2001-07-20", "ja", "Released", "Spirited Away", "8.5"),
        ("1996-03-22", "en", "Rumored", "Prototype", "5.5"),
        ("2000-05-19", "fr", "Released", "Montmartre Sketches", "7.9"),
        ("1995-10-30", "en", "Released", "Toy Story", "7.7"),
        ("2002-12-18", "en", "Released", "The Two Towers", "8.6"),
        ("1998-11-25", "fr", "Rumored", "Chef Story", "6.0"),
        ("2003-05-15", "fr", "Rumored", "Swimming Pool", "6.8"),
        ("1997-07-25", "en", "Released", "Air Force One", "6.3"),
    ];

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (i, (date, lang, status, title, vote)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{budget},,{lang},{title},,{date},{revenue},{runtime},{status},{title},{vote},{votes},{company},16,{lang}\n",
            budget = 1_000_000 * (i + 1),
            revenue = 5_000_000 * (i + 1),
            runtime = 90 + i,
            votes = 100 + i,
            company = i + 1,
        ));
    }
    csv
}

#[tokio::test]
async fn upload_rejects_missing_file_part() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(upload_request("data", Some("movies.csv"), sample_csv().as_str()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"], "No file part");
}

#[tokio::test]
async fn upload_rejects_empty_filename() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(upload_request("file", None, sample_csv().as_str()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"], "No selected file");
}

#[tokio::test]
async fn upload_rejects_non_csv_filename() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(upload_request("file", Some("movies.txt"), sample_csv().as_str()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"], "Invalid file format");
}

#[tokio::test]
async fn upload_rejects_missing_columns_and_leaves_store_unchanged() {
    let app = spawn_app().await;

    // Header without the trailing "languages" column.
    let header = CSV_HEADER.rsplit_once(',').unwrap().0;
    let csv = format!("{header}\n1000,,en,T,,1995-01-01,1,90,Released,T,5.0,1,1,16\n");

    let response = app
        .clone()
        .oneshot(upload_request("file", Some("movies.csv"), &csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["error"],
        "CSV columns do not match the expected structure."
    );

    let listing = get_movies(&app, "").await;
    assert_eq!(listing["total_movies"], 0);
    assert_eq!(listing["movies"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upload_inserts_one_row_per_csv_row() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "per_page=100").await;
    assert_eq!(listing["total_movies"], 12);
    assert_eq!(listing["movies"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn movies_default_listing_is_first_ten_by_release_date() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "").await;
    assert_eq!(listing["page"], 1);
    assert_eq!(listing["per_page"], 10);
    assert_eq!(listing["total_movies"], 12);

    let movies = listing["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 10);

    let dates: Vec<&str> = movies
        .iter()
        .map(|m| m["release_date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);
    assert_eq!(dates[0], "1994-07-06");
    assert_eq!(dates[9], "2002-12-18");

    // Store-assigned identifiers survive serialization.
    assert!(movies.iter().all(|m| m["id"].is_i64()));
}

#[tokio::test]
async fn movies_year_filter_is_a_release_date_prefix_match() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "year=1995").await;
    assert_eq!(listing["total_movies"], 2);

    let movies = listing["movies"].as_array().unwrap();
    assert!(
        movies
            .iter()
            .all(|m| m["release_date"].as_str().unwrap().starts_with("1995"))
    );
}

#[tokio::test]
async fn movies_filters_combine_with_and_semantics() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "year=2003&language=fr&status=Rumored").await;
    assert_eq!(listing["total_movies"], 1);

    let movie = &listing["movies"][0];
    assert_eq!(movie["title"], "Swimming Pool");
    assert_eq!(movie["original_language"], "fr");
    assert_eq!(movie["status"], "Rumored");

    let listing = get_movies(&app, "year=1995&language=en&status=Released").await;
    assert_eq!(listing["total_movies"], 1);
    assert_eq!(listing["movies"][0]["title"], "Toy Story");
}

#[tokio::test]
async fn movies_pagination_slices_the_sorted_set() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "page=2&per_page=5").await;
    assert_eq!(listing["page"], 2);
    assert_eq!(listing["per_page"], 5);
    assert_eq!(listing["total_movies"], 12);

    let dates: Vec<&str> = listing["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["release_date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec![
            "1998-11-25",
            "1999-03-31",
            "2000-05-19",
            "2001-07-20",
            "2002-12-18"
        ]
    );

    // Past the end: an empty page, not an error.
    let listing = get_movies(&app, "page=5&per_page=10").await;
    assert_eq!(listing["movies"].as_array().unwrap().len(), 0);
    assert_eq!(listing["total_movies"], 12);
}

#[tokio::test]
async fn movies_sort_descending_by_vote_average() {
    let app = spawn_app().await;
    upload_csv(&app, &sample_csv()).await;

    let listing = get_movies(&app, "sort_by=vote_average&sort_order=-1&per_page=3").await;

    let votes: Vec<f64> = listing["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["vote_average"].as_f64().unwrap())
        .collect();
    assert_eq!(votes, vec![8.9, 8.8, 8.7]);
}

#[tokio::test]
async fn movies_rejects_out_of_domain_parameters() {
    let app = spawn_app().await;

    for query in [
        "page=0",
        "per_page=0",
        "sort_order=5",
        "sort_by=popularity",
        "page=abc",
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/movies?{query}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "query was: {query}"
        );
    }
}

#[tokio::test]
async fn uploaded_row_round_trips_through_the_query_endpoint() {
    let app = spawn_app().await;

    let csv = format!(
        "{CSV_HEADER}\n30000000,,en,Toy Story,A cowboy doll.,1995-10-30,373554033,81.0,Released,Toy Story,7.7,5415,3,16,en\n"
    );
    upload_csv(&app, &csv).await;

    let listing = get_movies(&app, "").await;
    assert_eq!(listing["total_movies"], 1);

    let movie = &listing["movies"][0];
    assert_eq!(movie["id"], 1);
    assert_eq!(movie["budget"], 30_000_000.0);
    assert!(movie["homepage"].is_null());
    assert_eq!(movie["original_language"], "en");
    assert_eq!(movie["original_title"], "Toy Story");
    assert_eq!(movie["overview"], "A cowboy doll.");
    assert_eq!(movie["release_date"], "1995-10-30");
    assert_eq!(movie["revenue"], 373_554_033.0);
    assert_eq!(movie["runtime"], 81.0);
    assert_eq!(movie["status"], "Released");
    assert_eq!(movie["title"], "Toy Story");
    assert_eq!(movie["vote_average"], 7.7);
    assert_eq!(movie["vote_count"], 5415);
    assert_eq!(movie["production_company_id"], 3);
    assert_eq!(movie["genre_id"], 16);
    assert_eq!(movie["languages"], "en");
}

#[tokio::test]
async fn health_probes_respond() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "alive");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ready"], true);
}
