//! Built-in queries over the painting schema.
//!
//! Tables: `artist`, `canvas_size`, `image_link`, `museum_hours`, `museum`,
//! `product_size`, `subject`, `work`. Statements use the DuckDB dialect and
//! every read query has a total `ORDER BY` so repeated runs return rows in
//! the same order.

use crate::query::NamedQuery;
use gq_core::sql_utils::{quote_ident, string_literal};

/// Tables compacted by the dedup entries, with their partition columns.
pub const DEDUP_TABLES: &[(&str, &[&str])] = &[
    (
        "product_size",
        &["work_id", "size_id", "sale_price", "regular_price"],
    ),
    ("work", &["work_id", "name", "artist_id", "style", "museum_id"]),
    ("subject", &["work_id", "subject"]),
    (
        "image_link",
        &["work_id", "url", "thumbnail_small_url", "thumbnail_large_url"],
    ),
];

/// Opening hours are `HH:MM:AM|PM` on a 12-hour clock.
pub const OPENING_TIME_FORMAT: &str = "%I:%M:%p";

const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// `column` parsed as an opening time; NULL when it does not parse.
fn opening_time(column: &str) -> String {
    format!(
        "try_strptime({}, {})",
        quote_ident(column),
        string_literal(OPENING_TIME_FORMAT)
    )
}

/// A `museum_hours` row is invalid when its day is missing or not a weekday
/// name, or either time fails to parse (e.g. `13:00:PM`, or NULL).
fn invalid_museum_hours() -> String {
    let weekdays: Vec<String> = WEEKDAYS.iter().map(|d| string_literal(d)).collect();
    format!(
        "\"day\" IS NULL OR \"day\" NOT IN ({}) OR {} IS NULL OR {} IS NULL",
        weekdays.join(", "),
        opening_time("open"),
        opening_time("close")
    )
}

pub fn builtin_queries() -> Vec<NamedQuery> {
    let mut queries = read_queries();

    for (table, columns) in DEDUP_TABLES {
        queries.push(NamedQuery::duplicate_count(
            &format!("duplicate_rows_{table}"),
            &format!("Number of fully duplicated rows in {table}"),
            table,
        ));
        queries.push(NamedQuery::dedup(
            &format!("dedup_{table}"),
            &format!("Remove duplicate rows from {table}, keeping one row per group"),
            table,
            columns,
        ));
    }

    queries.push(NamedQuery::delete(
        "delete_invalid_museum_hours",
        "Remove museum_hours rows with an unknown day or an out-of-range opening time",
        "museum_hours",
        &invalid_museum_hours(),
    ));

    queries
}

fn read_queries() -> Vec<NamedQuery> {
    vec![
        NamedQuery::read(
            "unexhibited_paintings",
            "Paintings not displayed in any museum",
            "SELECT DISTINCT name FROM work WHERE museum_id IS NULL ORDER BY name",
            &["name"],
        ),
        NamedQuery::read(
            "museums_without_paintings",
            "Museums with no paintings",
            "SELECT m.museum_id, m.name FROM museum m \
             WHERE NOT EXISTS (SELECT 1 FROM work w WHERE w.museum_id = m.museum_id) \
             ORDER BY m.museum_id",
            &["museum_id", "name"],
        ),
        NamedQuery::read(
            "sale_above_regular_price",
            "Paintings whose asking price exceeds their regular price",
            "SELECT DISTINCT work_id FROM product_size \
             WHERE sale_price > regular_price ORDER BY work_id",
            &["work_id"],
        ),
        NamedQuery::read(
            "sale_below_half_regular_price",
            "Paintings whose asking price is less than 50% of their regular price",
            "SELECT DISTINCT w.name FROM product_size ps \
             JOIN work w ON ps.work_id = w.work_id \
             WHERE ps.sale_price < 0.5 * ps.regular_price \
             ORDER BY name",
            &["name"],
        ),
        NamedQuery::read(
            "most_expensive_canvas_size",
            "Canvas size with the highest asking price",
            "SELECT cs.size_id, cs.label, ps.sale_price FROM canvas_size cs \
             JOIN product_size ps ON cs.size_id = ps.size_id \
             ORDER BY ps.sale_price DESC, cs.size_id LIMIT 1",
            &["size_id", "label", "sale_price"],
        ),
        NamedQuery::read(
            "museums_with_invalid_city",
            "Museums whose city is purely numeric",
            "SELECT museum_id, name, city FROM museum \
             WHERE regexp_matches(CAST(city AS VARCHAR), '^[0-9]+$') \
             ORDER BY museum_id",
            &["museum_id", "name", "city"],
        ),
        NamedQuery::read(
            "top_subjects",
            "Ten most common painting subjects",
            "SELECT subject, COUNT(subject) AS cnt_subject FROM subject \
             WHERE subject IS NOT NULL \
             GROUP BY subject ORDER BY cnt_subject DESC, subject LIMIT 10",
            &["subject", "cnt_subject"],
        ),
        NamedQuery::read(
            "museums_open_sunday_and_monday",
            "Museums open on both Sunday and Monday",
            "SELECT m.name, m.city FROM museum m \
             JOIN (SELECT museum_id FROM museum_hours \
                   WHERE \"day\" IN ('Sunday', 'Monday') \
                   GROUP BY museum_id HAVING COUNT(DISTINCT \"day\") = 2) open_both \
             ON m.museum_id = open_both.museum_id \
             ORDER BY m.name, m.city",
            &["name", "city"],
        ),
        NamedQuery::read(
            "museums_open_every_day",
            "Number of museums open all seven days",
            "SELECT COUNT(*) AS cnt_open_every_day FROM (\
             SELECT museum_id FROM museum_hours \
             GROUP BY museum_id HAVING COUNT(DISTINCT \"day\") = 7) open_daily",
            &["cnt_open_every_day"],
        ),
        NamedQuery::read(
            "top_museums_by_paintings",
            "Five museums holding the most paintings",
            "SELECT ranked.museum_id, ranked.cnt_paintings, m.name, m.city FROM (\
             SELECT museum_id, COUNT(name) AS cnt_paintings FROM work \
             WHERE museum_id IS NOT NULL GROUP BY museum_id \
             ORDER BY cnt_paintings DESC, museum_id LIMIT 5) ranked \
             JOIN museum m ON ranked.museum_id = m.museum_id \
             ORDER BY ranked.cnt_paintings DESC, ranked.museum_id",
            &["museum_id", "cnt_paintings", "name", "city"],
        ),
        NamedQuery::read(
            "top_artists_by_paintings",
            "Five artists with the most paintings",
            "SELECT ranked.artist_id, ranked.cnt_paintings, a.full_name, a.nationality, a.style FROM (\
             SELECT artist_id, COUNT(name) AS cnt_paintings FROM work \
             GROUP BY artist_id ORDER BY cnt_paintings DESC, artist_id LIMIT 5) ranked \
             JOIN artist a ON ranked.artist_id = a.artist_id \
             ORDER BY ranked.cnt_paintings DESC, ranked.artist_id",
            &["artist_id", "cnt_paintings", "full_name", "nationality", "style"],
        ),
        NamedQuery::read(
            "least_popular_canvas_sizes",
            "Canvas sizes in the three lowest popularity ranks",
            "WITH count_work_by_size AS (\
               SELECT size_id, COUNT(work_id) AS cnt_work FROM product_size \
               WHERE size_id = round(size_id) GROUP BY size_id), \
             ranked AS (\
               SELECT size_id, cnt_work, dense_rank() OVER (ORDER BY cnt_work ASC) AS rnk \
               FROM count_work_by_size) \
             SELECT size_id, cnt_work, rnk FROM ranked WHERE rnk <= 3 \
             ORDER BY rnk, size_id",
            &["size_id", "cnt_work", "rnk"],
        ),
        NamedQuery::read(
            "longest_open_museum_day",
            "Museum and day with the longest opening hours",
            &format!(
                "WITH durations AS (\
               SELECT museum_id, \"day\", \"open\", \"close\", \
                      date_diff('minute', {open}, {close}) / 60.0 AS hours_open \
               FROM museum_hours), \
             ranked AS (\
               SELECT *, rank() OVER (ORDER BY hours_open DESC) AS rnk \
               FROM durations WHERE hours_open IS NOT NULL) \
             SELECT m.name, m.state, r.\"day\", r.\"open\", r.\"close\", r.hours_open \
             FROM ranked r JOIN museum m ON m.museum_id = r.museum_id \
             WHERE r.rnk = 1 \
             ORDER BY m.name, r.\"day\"",
                open = opening_time("open"),
                close = opening_time("close"),
            ),
            &["name", "state", "day", "open", "close", "hours_open"],
        ),
        NamedQuery::read(
            "museum_with_most_popular_style",
            "Museum holding the most paintings in the most popular style",
            "WITH most_popular_style AS (\
               SELECT style FROM work WHERE style IS NOT NULL \
               GROUP BY style ORDER BY COUNT(*) DESC, style LIMIT 1), \
             museum_counts AS (\
               SELECT museum_id, COUNT(*) AS cnt_paintings FROM work \
               WHERE style IN (SELECT style FROM most_popular_style) AND museum_id IS NOT NULL \
               GROUP BY museum_id ORDER BY cnt_paintings DESC, museum_id LIMIT 1) \
             SELECT m.museum_id, m.name, m.city, s.style, mc.cnt_paintings \
             FROM museum_counts mc \
             JOIN museum m ON mc.museum_id = m.museum_id \
             CROSS JOIN most_popular_style s",
            &["museum_id", "name", "city", "style", "cnt_paintings"],
        ),
        NamedQuery::read(
            "artists_in_multiple_countries",
            "Artists whose paintings hang in museums in two or more countries",
            "WITH artist_country AS (\
               SELECT w.artist_id, COUNT(DISTINCT m.country) AS cnt_country \
               FROM work w JOIN museum m ON m.museum_id = w.museum_id \
               GROUP BY w.artist_id) \
             SELECT ac.artist_id, ac.cnt_country, a.full_name, a.nationality, a.style \
             FROM artist_country ac JOIN artist a ON ac.artist_id = a.artist_id \
             WHERE ac.cnt_country >= 2 \
             ORDER BY ac.cnt_country DESC, ac.artist_id",
            &["artist_id", "cnt_country", "full_name", "nationality", "style"],
        ),
    ]
}
