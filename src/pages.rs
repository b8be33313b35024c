//! HTML rendering for the dashboard, browser and about pages.
//!
//! All pages are plain server-rendered HTML with one embedded stylesheet,
//! built by string assembly. No templating engine: the whole surface is three
//! pages of links, and keeping it as code keeps it greppable.

use std::path::Path;

use crate::browse::{base_name, Crumb, EntryKind, Listing};
use crate::player::{PlayerStatus, VOLUME_STEPS};

/// Stylesheet served at `/style.css`, referenced by every page.
pub const STYLE_CSS: &str = "\
body {
    font-family: sans-serif;
    font-size: 32px;
    background: #000000;
    color: #a0a0a0;
}

a {
    text-decoration: none;
    font-weight: bold;
    color: #00a000;
}

#top {
    position: absolute;
    top: 0px;
    left: 0px;
    width: 100%;
    height: 50px;
    background: #00a000;
    color: #000000;
    padding: 10px;
    font-size: 40px;
    font-weight: bold;
}

#main {
    position: absolute;
    top: 80px;
    left: 0px;
    width: 100%;
    padding: 10px;
}

.filelist {
    margin-top: 1em;
    font-size: 80%;
}

.volume {
    font-family: monospace;
}
";

const PAGE_TITLE: &str = "couchctl";

/// Escape text for interpolation into HTML body or attribute context.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a path for use as a query-string value.
fn quote_path(path: &Path) -> String {
    urlencoding::encode(&path.to_string_lossy()).into_owned()
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <link rel=\"stylesheet\" href=\"/style.css\" />\n\
         <title>{PAGE_TITLE}</title>\n\
         </head>\n\
         <body>\n\
         <div id=\"top\">{PAGE_TITLE}</div>\n\
         <div id=\"main\">\n\
         {body}\
         </div>\n\
         </body>\n\
         </html>\n"
    )
}

/// The dashboard: current media, transport links, volume bar, seek links.
pub fn dashboard(status: &PlayerStatus) -> String {
    let mut out = String::new();

    out.push_str("Currently playing: ");
    match &status.mrl {
        None => out.push_str("nothing"),
        Some(mrl) => {
            let name = mrl.rsplit('/').next().unwrap_or(mrl);
            out.push_str(&escape(name));
            if status.paused {
                out.push_str(" (paused)");
            }
        }
    }
    out.push_str("<br />\n");

    out.push_str("Player: ");
    out.push_str("[<a href=\"/action_fs\">Fullscreen</a>] ");
    out.push_str("[<a href=\"/action_play\">Play</a>] ");
    out.push_str("[<a href=\"/action_pause\">Pause</a>] ");
    out.push_str("<br />\n");

    // Each notch is a link setting the volume to that level.
    let level = (status.volume * f64::from(VOLUME_STEPS)).round() as i64;
    out.push_str("Volume: <span class=\"volume\">");
    for i in 0..=i64::from(VOLUME_STEPS) {
        let glyph = if i <= level { '#' } else { '-' };
        out.push_str(&format!(" <a href=\"/action_volume?level={i}\">{glyph}</a>"));
    }
    out.push_str("</span><br />\n");

    out.push_str("Seek: ");
    out.push_str("[<a href=\"/action_seek?rel=-60\">&lt;&lt;</a>] ");
    out.push_str("[<a href=\"/action_seek?rel=-10\">&lt;</a>] ");
    out.push_str("[<a href=\"/action_seek?rel=10\">&gt;</a>] ");
    out.push_str("[<a href=\"/action_seek?rel=60\">&gt;&gt;</a>] ");
    out.push_str("<br />\n");

    out.push_str("Misc: ");
    out.push_str("[<a href=\"/action_ss_reset\">Screensaver off</a>] ");
    out.push_str("[<a href=\"/browse\">Browse</a>] ");
    out.push_str("[<a href=\"/about\">About</a>] ");
    out.push_str("<br />\n");

    page(&out)
}

/// A directory listing: breadcrumbs, then subdirectories and playable files.
pub fn browse_page(listing: &Listing, media_home: &str) -> String {
    let mut out = String::new();

    out.push_str("[<a href=\"/\">Dashboard</a>] ");
    out.push_str(&format!(
        "[<a href=\"/browse?path={}\">Media home</a>] ",
        urlencoding::encode(media_home)
    ));
    out.push_str("<br />\n");

    out.push_str("Path: ");
    for Crumb { path, navigable } in &listing.breadcrumbs {
        let label = escape(&base_name(path));
        if *navigable {
            out.push_str(&format!(
                "<a href=\"/browse?path={}\">{label}</a> :: ",
                quote_path(path)
            ));
        } else {
            out.push_str(&format!("{label} :: "));
        }
    }
    out.push_str(&escape(&base_name(&listing.path)));
    out.push_str("<br />\n");

    out.push_str("<div class=\"filelist\">\n");
    for entry in &listing.entries {
        let name = escape(&entry.name);
        let href = quote_path(&entry.path);
        match entry.kind {
            EntryKind::Dir => out.push_str(&format!(
                "[DIR] <a href=\"/browse?path={href}\">{name}</a><br />\n"
            )),
            EntryKind::Playable => out.push_str(&format!(
                "<a href=\"/action_open?path={href}\">{name}</a><br />\n"
            )),
        }
    }
    out.push_str("</div>\n");

    page(&out)
}

pub fn about_page() -> String {
    page(concat!(
        "couchctl (media player web remote)<br />\n",
        "Remote control a player running on a single-threaded event loop\n",
        "from any browser on the local network.<br />\n",
        "<br />\n",
        "[<a href=\"/\">Dashboard</a>]\n",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::PathEntry;
    use std::path::PathBuf;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape("<b>&\"it's\""),
            "&lt;b&gt;&amp;&quot;it&#39;s&quot;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_dashboard_shows_paused_media() {
        let html = dashboard(&PlayerStatus {
            mrl: Some("file:///media/show & tell.mkv".into()),
            paused: true,
            volume: 0.5,
        });
        assert!(html.contains("show &amp; tell.mkv"));
        assert!(html.contains("(paused)"));
    }

    #[test]
    fn test_dashboard_volume_bar_reflects_level() {
        let html = dashboard(&PlayerStatus {
            mrl: None,
            paused: false,
            volume: 0.5,
        });
        assert!(html.contains("nothing"));
        // 17 notches, levels 0..=8 filled at volume 0.5
        assert_eq!(html.matches(">#</a>").count(), 9);
        assert_eq!(html.matches(">-</a>").count(), 8);
        assert!(html.contains("/action_volume?level=16"));
    }

    #[test]
    fn test_browse_page_links_and_labels() {
        let listing = Listing {
            path: PathBuf::from("/media/my shows"),
            entries: vec![
                PathEntry {
                    name: "comedy".into(),
                    path: PathBuf::from("/media/my shows/comedy"),
                    kind: EntryKind::Dir,
                },
                PathEntry {
                    name: "pilot.avi".into(),
                    path: PathBuf::from("/media/my shows/pilot.avi"),
                    kind: EntryKind::Playable,
                },
            ],
            breadcrumbs: vec![
                Crumb { path: PathBuf::from("/"), navigable: false },
                Crumb { path: PathBuf::from("/media"), navigable: true },
            ],
        };
        let html = browse_page(&listing, "/media");

        // Spaces percent-encoded in links, escaped text labels
        assert!(html.contains("/browse?path=%2Fmedia%2Fmy%20shows%2Fcomedy"));
        assert!(html.contains("/action_open?path=%2Fmedia%2Fmy%20shows%2Fpilot.avi"));
        assert!(html.contains("[DIR] "));
        // Inert crumb has no link; navigable one does
        assert!(html.contains("<a href=\"/browse?path=%2Fmedia\">media</a>"));
        assert!(!html.contains("<a href=\"/browse?path=%2F\">"));
    }
}
