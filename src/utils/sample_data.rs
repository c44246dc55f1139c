//! Built-in movies used to seed an empty local store and as fixtures in tests

use crate::models::{Movie, Rating};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ratings(imdb: &str, tomatoes: &str, metacritic: &str) -> Vec<Rating> {
    vec![
        Rating::new("Internet Movie Database", imdb),
        Rating::new("Rotten Tomatoes", tomatoes),
        Rating::new("Metacritic", metacritic),
    ]
}

/// Five well-known movies with complete details
pub fn sample_movies() -> Vec<Movie> {
    vec![
        Movie {
            imdb_id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: 1994,
            rated: "R".to_string(),
            released: "14 Oct 1994".to_string(),
            runtime: "142 min".to_string(),
            genres: list(&["Drama"]),
            director: "Frank Darabont".to_string(),
            writers: list(&["Stephen King", "Frank Darabont"]),
            actors: list(&["Tim Robbins", "Morgan Freeman", "Bob Gunton"]),
            plot: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.".to_string(),
            languages: list(&["English"]),
            countries: list(&["USA"]),
            awards: "Nominated for 7 Oscars. 21 wins & 43 nominations total".to_string(),
            poster: "https://m.media-amazon.com/images/M/MV5BMDFkYTc0MGEtZmNhMC00ZDIzLWFmNTEtODM1ZmRlYWMwMWFmXkEyXkFqcGdeQXVyMTMxODk2OTU@._V1_SX300.jpg".to_string(),
            ratings: ratings("9.3/10", "91%", "80/100"),
            metascore: 80,
            imdb_rating: 9.3,
            imdb_votes: "2,405,546".to_string(),
            media_type: "movie".to_string(),
            dvd: "21 Dec 1999".to_string(),
            box_office: "$28,699,976".to_string(),
            production: "Columbia Pictures, Castle Rock Entertainment".to_string(),
            ..Movie::default()
        },
        Movie {
            imdb_id: "tt0068646".to_string(),
            title: "The Godfather".to_string(),
            year: 1972,
            rated: "R".to_string(),
            released: "24 Mar 1972".to_string(),
            runtime: "175 min".to_string(),
            genres: list(&["Crime", "Drama"]),
            director: "Francis Ford Coppola".to_string(),
            writers: list(&["Mario Puzo", "Francis Ford Coppola"]),
            actors: list(&["Marlon Brando", "Al Pacino", "James Caan"]),
            plot: "The aging patriarch of an organized crime dynasty in postwar New York City transfers control of his clandestine empire to his reluctant youngest son.".to_string(),
            languages: list(&["English", "Italian", "Latin"]),
            countries: list(&["USA"]),
            awards: "Won 3 Oscars. 31 wins & 30 nominations total".to_string(),
            poster: "https://m.media-amazon.com/images/M/MV5BM2MyNjYxNmUtYTAwNi00MTYxLWJmNWYtYzZlODY3ZTk3OTFlXkEyXkFqcGdeQXVyNzkwMjQ5NzM@._V1_SX300.jpg".to_string(),
            ratings: ratings("9.2/10", "97%", "100/100"),
            metascore: 100,
            imdb_rating: 9.2,
            imdb_votes: "1,733,648".to_string(),
            media_type: "movie".to_string(),
            dvd: "11 May 2004".to_string(),
            box_office: "$136,381,073".to_string(),
            production: "Paramount Pictures".to_string(),
            ..Movie::default()
        },
        Movie {
            imdb_id: "tt0468569".to_string(),
            title: "The Dark Knight".to_string(),
            year: 2008,
            rated: "PG-13".to_string(),
            released: "18 Jul 2008".to_string(),
            runtime: "152 min".to_string(),
            genres: list(&["Action", "Crime", "Drama"]),
            director: "Christopher Nolan".to_string(),
            writers: list(&["Jonathan Nolan", "Christopher Nolan"]),
            actors: list(&["Christian Bale", "Heath Ledger", "Aaron Eckhart"]),
            plot: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.".to_string(),
            languages: list(&["English", "Mandarin"]),
            countries: list(&["USA", "UK"]),
            awards: "Won 2 Oscars. 159 wins & 163 nominations total".to_string(),
            poster: "https://m.media-amazon.com/images/M/MV5BMTMxNTMwODM0NF5BMl5BanBnXkFtZTcwODAyMTk2Mw@@._V1_SX300.jpg".to_string(),
            ratings: ratings("9.0/10", "94%", "84/100"),
            metascore: 84,
            imdb_rating: 9.0,
            imdb_votes: "2,445,066".to_string(),
            media_type: "movie".to_string(),
            dvd: "09 Dec 2008".to_string(),
            box_office: "$534,858,444".to_string(),
            production: "Warner Bros. Pictures".to_string(),
            ..Movie::default()
        },
        Movie {
            imdb_id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            year: 1999,
            rated: "R".to_string(),
            released: "31 Mar 1999".to_string(),
            runtime: "136 min".to_string(),
            genres: list(&["Action", "Sci-Fi"]),
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            writers: list(&["Lana Wachowski", "Lilly Wachowski"]),
            actors: list(&["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"]),
            plot: "When a beautiful stranger leads computer hacker Neo to a forbidding underworld, he discovers the shocking truth--the life he knows is the elaborate deception of an evil cyber-intelligence.".to_string(),
            languages: list(&["English"]),
            countries: list(&["USA", "Australia"]),
            awards: "Won 4 Oscars. 42 wins & 51 nominations total".to_string(),
            poster: "https://m.media-amazon.com/images/M/MV5BNzQzOTk3OTAtNDQ0Zi00ZTVkLWI0MTEtMDllZjNkYzNjNTc4L2ltYWdlXkEyXkFqcGdeQXVyNjU0OTQ0OTY@._V1_SX300.jpg".to_string(),
            ratings: ratings("8.7/10", "88%", "73/100"),
            metascore: 73,
            imdb_rating: 8.7,
            imdb_votes: "1,758,266".to_string(),
            media_type: "movie".to_string(),
            dvd: "21 Sep 1999".to_string(),
            box_office: "$171,479,930".to_string(),
            production: "Warner Bros., Village Roadshow Pictures".to_string(),
            ..Movie::default()
        },
        Movie {
            imdb_id: "tt0109830".to_string(),
            title: "Forrest Gump".to_string(),
            year: 1994,
            rated: "PG-13".to_string(),
            released: "06 Jul 1994".to_string(),
            runtime: "142 min".to_string(),
            genres: list(&["Drama", "Romance"]),
            director: "Robert Zemeckis".to_string(),
            writers: list(&["Winston Groom", "Eric Roth"]),
            actors: list(&["Tom Hanks", "Robin Wright", "Gary Sinise"]),
            plot: "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold from the perspective of an Alabama man with an IQ of 75, whose only desire is to be reunited with his childhood sweetheart.".to_string(),
            languages: list(&["English"]),
            countries: list(&["USA"]),
            awards: "Won 6 Oscars. 45 wins & 75 nominations total".to_string(),
            poster: "https://m.media-amazon.com/images/M/MV5BNWIwODRlZTUtY2U3ZS00Yzg1LWJhNzYtMmZiYmEyNmU1NjMzXkEyXkFqcGdeQXVyMTQxNzMzNDI@._V1_SX300.jpg".to_string(),
            ratings: ratings("8.8/10", "71%", "82/100"),
            metascore: 82,
            imdb_rating: 8.8,
            imdb_votes: "1,893,980".to_string(),
            media_type: "movie".to_string(),
            dvd: "28 Aug 2001".to_string(),
            box_office: "$330,252,182".to_string(),
            production: "Paramount Pictures".to_string(),
            ..Movie::default()
        },
    ]
}
