//! In-process HTTP fakes shared by the client tests.
use axum::Router;
use stac::{Asset, Item};
use tokio::net::TcpListener;
use url::Url;

pub async fn bind() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    (listener, base)
}

pub fn spawn(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

pub async fn serve(router: Router) -> Url {
    let (listener, base) = bind().await;
    spawn(listener, router);
    base
}

pub fn item(id: &str, assets: &[(&str, &str)]) -> Item {
    let mut item = Item::new(id);
    for (key, href) in assets {
        item.assets.insert(key.to_string(), Asset::new(*href));
    }
    item
}

pub fn item_json(id: &str, assets: &[(&str, &str)]) -> serde_json::Value {
    serde_json::to_value(item(id, assets)).unwrap()
}
