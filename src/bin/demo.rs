use curlreq::parse;

fn main() {
    let curl_command = r#"curl 'http://example.com' -H 'Accept: application/json' -d '{"hello": "world"}'"#;
    match parse(curl_command) {
        Ok(req) => println!("{:#?}", req),
        Err(e) => eprintln!("Error parsing curl command: {e}"),
    }
}
