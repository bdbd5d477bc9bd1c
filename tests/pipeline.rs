#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tryreport::{export, fetch, Extractor, ReportConfig};

    const BODY: &str = "\r\n\r\n  jsonp701({\"total\":3,\"tryReportList\":[[{\"userNick\":\"a***1\",\"content\":\"nice\"}],[{\"userNick\":\"b***2\",\"appendContent\":\"ok\"},{\"userNick\":\"c***3\"}]]})";

    #[tokio::test]
    async fn fetch_extract_and_write_one_page() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = sock.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let resp = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                BODY.len(),
                BODY
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            request
        });

        let dir = tempdir().unwrap();
        let cfg = ReportConfig {
            host: addr.to_string(),
            output: dir.path().join("TryReport.xlsx"),
            parquet_output: Some(dir.path().join("TryReport.parquet")),
            ..ReportConfig::default()
        };

        let now = Utc.timestamp_millis_opt(1519889611274).unwrap();
        let mut url = fetch::report_url(&cfg, now).unwrap();
        // local test server speaks plain HTTP
        url.set_scheme("http").unwrap();

        let client = fetch::build_client(&cfg).unwrap();
        let raw = fetch::fetch_report(&client, &url).await.unwrap();
        let table = Extractor::from_config(&cfg)
            .extract(&raw, url.as_str())
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns(),
            &["userNick", "content", "appendContent", "url"]
        );
        assert!(table
            .rows()
            .iter()
            .all(|r| r["url"].as_str() == Some(url.as_str())));

        export::write_spreadsheet(&table, &cfg.output, &cfg.sheet_name).unwrap();
        export::write_parquet(&table, cfg.parquet_output.as_ref().unwrap()).unwrap();
        assert!(cfg.output.exists());
        assert!(dir.path().join("TryReport.parquet").exists());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /listTryReport.htm?itemId=545135822523&pageSize=75&currentPage=1&_ksTS=1519889611274_700&callback=jsonp701 "));
    }
}
