use crate::error::Result;
use crate::processor::Player;
use crate::scrapers::{detail, qualification, roster};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use tracing::info;
use url::Url;

/// Fetches one page of markup by href, relative or absolute.
pub trait Fetch {
    async fn fetch(&self, href: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, href: &str) -> Result<String> {
        let url = self.base.join(href)?;
        Ok(self.client.get(url).send().await?.text().await?)
    }
}

pub struct Crawler<F> {
    fetcher: F,
    event_slug: String,
    /// `None` disables qualification-page visits altogether.
    qualification_marker: Option<String>,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, event_slug: String, qualification_marker: Option<String>) -> Self {
        Self {
            fetcher,
            event_slug,
            qualification_marker,
        }
    }

    /// Walks the listing pages in order and enriches every player found.
    /// The first page that contributes no new players ends the crawl; the
    /// site has no explicit last-page signal.
    pub async fn run(&self) -> Result<Vec<Player>> {
        let mut players = Vec::new();
        let mut seen = HashSet::new();

        let mut page = 1;
        loop {
            let href = format!("/spielerliste/{}/nach-name/{}", self.event_slug, page);
            info!("Fetching roster page {}", page);
            let body = self.fetcher.fetch(&href).await?;

            let stubs = new_stubs(&body, &mut seen)?;
            if stubs.is_empty() {
                break;
            }

            for stub in stubs {
                players.push(self.enrich(stub).await?);
            }
            page += 1;
        }

        info!("Crawl finished with {} players", players.len());
        Ok(players)
    }

    async fn enrich(&self, mut player: Player) -> Result<Player> {
        info!("Loading {}", player.name);
        let body = self.fetcher.fetch(&player.details_url).await?;

        // The parsed document must not live across an await point.
        let qualification_url = {
            let document = Html::parse_document(&body);
            detail::enrich(&mut player, &document)?;
            match &self.qualification_marker {
                Some(marker) => detail::find_qualification_link(&document, marker)?,
                None => None,
            }
        };

        if let Some(href) = qualification_url {
            let body = self.fetcher.fetch(&href).await?;
            let document = Html::parse_document(&body);
            player.qualification_statistics = qualification::qualification_statistics(&document)?;
        }

        Ok(player)
    }
}

/// Parses one listing page, keeping only players not crawled before, keyed
/// on their details URL.
fn new_stubs(body: &str, seen: &mut HashSet<String>) -> Result<Vec<Player>> {
    let document = Html::parse_document(body);
    let table = roster::roster_table(&document)?;

    let mut stubs = Vec::new();
    for stub in roster::parse_roster(table) {
        let stub = stub?;
        if seen.insert(stub.details_url.clone()) {
            stubs.push(stub);
        }
    }
    Ok(stubs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Statistics;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeFetcher {
        pages: HashMap<String, String>,
        log: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(href, body)| (href.to_string(), body.clone()))
                    .collect(),
                log: RefCell::new(Vec::new()),
            }
        }

        fn fetched(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, href: &str) -> Result<String> {
            self.log.borrow_mut().push(href.to_string());
            match self.pages.get(href) {
                Some(body) => Ok(body.clone()),
                None => panic!("unexpected fetch of {href}"),
            }
        }
    }

    fn listing_page(names: &[&str]) -> String {
        let rows: String = names
            .iter()
            .map(|name| {
                format!(
                    "<tr><td><a href=\"/spieler_profil/{name}/\">{name}</a></td><td></td>\
                     <td><a href=\"/teams/deutschland/\">Deutschland</a></td>\
                     <td>14.06.1990</td><td></td><td>Torwart</td></tr>"
                )
            })
            .collect();
        format!("<table><tr><th>Spieler</th></tr>{rows}</table>")
    }

    fn empty_detail_page() -> String {
        "<html><body></body></html>".to_string()
    }

    fn detail_page_with_qualification_link(name: &str) -> String {
        format!(
            "<div><div><h2>Länderspiele</h2><table>\
             <tr><td><a href=\"/spieler_profil/{name}/wm-quali-2018/\">WM-Quali</a></td></tr>\
             </table></div></div>"
        )
    }

    fn qualification_page() -> String {
        "<table class=\"standard_tabelle\">\
         <tr><th>Wettbewerb</th></tr>\
         <tr><td>WM-Quali</td><td>D</td><td>1</td><td>TW</td>\
         <td>8</td><td>3</td><td>7</td><td>1</td>\
         <td>0</td><td>2</td><td>0</td><td>1</td></tr>\
         </table>"
            .to_string()
    }

    #[tokio::test]
    async fn crawl_stops_after_the_first_page_without_new_players() {
        let fetcher = FakeFetcher::new(&[
            ("/spielerliste/ev/nach-name/1", listing_page(&["a", "b", "c"])),
            ("/spielerliste/ev/nach-name/2", listing_page(&["d", "e"])),
            // Page 3 repeats known players, so it contributes nothing new.
            ("/spielerliste/ev/nach-name/3", listing_page(&["a", "b"])),
            ("/spieler_profil/a/", empty_detail_page()),
            ("/spieler_profil/b/", empty_detail_page()),
            ("/spieler_profil/c/", empty_detail_page()),
            ("/spieler_profil/d/", empty_detail_page()),
            ("/spieler_profil/e/", empty_detail_page()),
        ]);

        let crawler = Crawler::new(fetcher, "ev".to_string(), Some("wm-quali".to_string()));
        let players = crawler.run().await.unwrap();

        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);

        let fetched = crawler.fetcher.fetched();
        assert!(fetched.contains(&"/spielerliste/ev/nach-name/3".to_string()));
        assert!(!fetched.iter().any(|href| href.ends_with("/nach-name/4")));
    }

    #[tokio::test]
    async fn qualification_page_is_fetched_when_linked() {
        let fetcher = FakeFetcher::new(&[
            ("/spielerliste/ev/nach-name/1", listing_page(&["a"])),
            ("/spielerliste/ev/nach-name/2", listing_page(&[])),
            ("/spieler_profil/a/", detail_page_with_qualification_link("a")),
            ("/spieler_profil/a/wm-quali-2018/", qualification_page()),
        ]);

        let crawler = Crawler::new(fetcher, "ev".to_string(), Some("wm-quali".to_string()));
        let players = crawler.run().await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(
            players[0].qualification_statistics,
            Statistics::from_ordered([8, 3, 7, 1, 0, 2, 0, 1])
        );
    }

    #[tokio::test]
    async fn qualification_pages_are_skipped_when_disabled() {
        let fetcher = FakeFetcher::new(&[
            ("/spielerliste/ev/nach-name/1", listing_page(&["a"])),
            ("/spielerliste/ev/nach-name/2", listing_page(&[])),
            ("/spieler_profil/a/", detail_page_with_qualification_link("a")),
        ]);

        let crawler = Crawler::new(fetcher, "ev".to_string(), None);
        let players = crawler.run().await.unwrap();

        assert_eq!(players[0].qualification_statistics, Statistics::default());
        assert!(!crawler
            .fetcher
            .fetched()
            .iter()
            .any(|href| href.contains("wm-quali")));
    }

    #[tokio::test]
    async fn detail_pages_are_visited_in_parse_order() {
        let fetcher = FakeFetcher::new(&[
            ("/spielerliste/ev/nach-name/1", listing_page(&["a", "b"])),
            ("/spielerliste/ev/nach-name/2", listing_page(&[])),
            ("/spieler_profil/a/", empty_detail_page()),
            ("/spieler_profil/b/", empty_detail_page()),
        ]);

        let crawler = Crawler::new(fetcher, "ev".to_string(), None);
        crawler.run().await.unwrap();

        assert_eq!(
            crawler.fetcher.fetched(),
            [
                "/spielerliste/ev/nach-name/1",
                "/spieler_profil/a/",
                "/spieler_profil/b/",
                "/spielerliste/ev/nach-name/2",
            ]
        );
    }
}
