use crate::dto::ranking::RankingEntry;

pub const CSV_HEADERS: [&str; 5] = [
    "Posição",
    "Autor",
    "Categoria",
    "Média Final",
    "Nº de Avaliações",
];

/// Renders a ranking as comma separated text with a header line. Text fields
/// are always quoted and averages are rounded to two decimals.
pub fn ranking_csv(entries: &[RankingEntry]) -> String {
    let mut csv = CSV_HEADERS.join(",");
    csv.push('\n');

    for entry in entries {
        let row = [
            entry.position.to_string(),
            quote(&entry.author_name),
            quote(&entry.category_name),
            format!("{:.2}", entry.average),
            entry.num_evaluations.to_string(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(position: u32, author: &str, category: &str, average: f64, count: usize) -> RankingEntry {
        RankingEntry {
            position,
            photo_id: Uuid::new_v4(),
            author_name: author.to_string(),
            url: "https://example.org/p.jpg".to_string(),
            category_id: Uuid::new_v4(),
            category_name: category.to_string(),
            average,
            num_evaluations: count,
        }
    }

    #[test]
    fn test_header_only_for_empty_ranking() {
        assert_eq!(
            ranking_csv(&[]),
            "Posição,Autor,Categoria,Média Final,Nº de Avaliações\n"
        );
    }

    #[test]
    fn test_rows_are_quoted_and_rounded() {
        let csv = ranking_csv(&[
            entry(1, "Ana", "Natureza", 8.666666, 3),
            entry(2, "Anônimo", "Retrato", 7.0, 1),
        ]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,\"Ana\",\"Natureza\",8.67,3");
        assert_eq!(lines[2], "2,\"Anônimo\",\"Retrato\",7.00,1");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let csv = ranking_csv(&[entry(1, "João \"Jota\" Silva", "P&B, urbano", 5.5, 2)]);

        assert!(csv.ends_with("1,\"João \"\"Jota\"\" Silva\",\"P&B, urbano\",5.50,2\n"));
    }
}
