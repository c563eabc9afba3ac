use crate::cli::ThresholdArgs;
use country_screener::error::AppError;
use country_screener::factbook::GdpYears;
use country_screener::screening::weights::{parse_rank, MAX_RANK, MIN_RANK};
use country_screener::screening::{Indicator, Rankings, ThresholdInput};
use std::io::{self, BufRead, Write};

/// Line-oriented question/answer session for values not given as flags.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one trimmed answer. Running out of input is an error rather than
    /// an empty answer.
    pub(crate) fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "input ended before answering '{}'",
                    question.trim_end_matches([':', ' '])
                ),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn answer_or_ask(&mut self, provided: Option<String>, question: &str) -> io::Result<String> {
        match provided {
            Some(value) => Ok(value),
            None => self.ask(question),
        }
    }

    pub(crate) fn threshold_input(
        &mut self,
        args: ThresholdArgs,
        years: GdpYears,
    ) -> io::Result<ThresholdInput> {
        Ok(ThresholdInput {
            population: self
                .answer_or_ask(args.population, "Enter the population threshold: ")?,
            gdp_growth_primary: self.answer_or_ask(
                args.gdp_primary,
                &format!(
                    "Enter the {} real GDP growth rate threshold: ",
                    years.primary
                ),
            )?,
            gdp_growth_secondary: self.answer_or_ask(
                args.gdp_secondary,
                &format!(
                    "Enter the {} real GDP growth rate threshold: ",
                    years.secondary
                ),
            )?,
            credit_rating: self.answer_or_ask(
                args.rating,
                "Enter the Fitch credit rating threshold (e.g., 'A'): ",
            )?,
            resources: self.answer_or_ask(
                args.resources,
                "Enter the natural resources you are looking for (comma-separated): ",
            )?,
        })
    }

    /// Collects one rank per indicator, asking again until each answer is an
    /// unused rank in range.
    pub(crate) fn rankings(&mut self, years: GdpYears) -> Result<Rankings, AppError> {
        writeln!(
            self.output,
            "Rank the importance of the following indicators ({MIN_RANK} = most important, {MAX_RANK} = least important):"
        )?;

        let mut ranks = [0u8; Indicator::COUNT];
        for indicator in Indicator::ordered() {
            let rank = self.rank_for(indicator, years, &ranks)?;
            ranks[indicator.index()] = rank;
        }
        Ok(Rankings::new(ranks)?)
    }

    fn rank_for(&mut self, indicator: Indicator, years: GdpYears, assigned: &[u8]) -> io::Result<u8> {
        let question = format!("Rank for {}: ", indicator.label(years));
        loop {
            let answer = self.ask(&question)?;
            match parse_rank(indicator, &answer) {
                Ok(rank) if !assigned.contains(&rank) => return Ok(rank),
                Ok(rank) => writeln!(
                    self.output,
                    "Rank {rank} is already assigned. Please enter an unused rank between {MIN_RANK} and {MAX_RANK}."
                )?,
                Err(_) => writeln!(
                    self.output,
                    "Invalid input. Please enter a number between {MIN_RANK} and {MAX_RANK}."
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn transcript(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf8 transcript")
    }

    #[test]
    fn only_missing_thresholds_are_asked() {
        let mut output = Vec::new();
        let args = ThresholdArgs {
            population: Some("40000000".to_string()),
            rating: Some("BBB".to_string()),
            ..ThresholdArgs::default()
        };
        let input = {
            let mut prompter = Prompter::new(Cursor::new("3.0\n2.5\ngas, gold\n"), &mut output);
            prompter
                .threshold_input(args, GdpYears::default())
                .expect("answers read")
        };

        assert_eq!(input.population, "40000000");
        assert_eq!(input.gdp_growth_primary, "3.0");
        assert_eq!(input.gdp_growth_secondary, "2.5");
        assert_eq!(input.credit_rating, "BBB");
        assert_eq!(input.resources, "gas, gold");

        let text = transcript(output);
        assert!(text.contains("Enter the 2023 real GDP growth rate threshold"));
        assert!(text.contains("Enter the 2022 real GDP growth rate threshold"));
        assert!(!text.contains("population threshold"));
        assert!(!text.contains("Fitch"));
    }

    #[test]
    fn rank_prompt_repeats_until_answer_is_valid_and_unused() {
        let mut output = Vec::new();
        let rankings = {
            let mut prompter =
                Prompter::new(Cursor::new("first\n9\n2\n2\n1\n3\n5\n4\n"), &mut output);
            prompter
                .rankings(GdpYears::default())
                .expect("rankings collected")
        };

        assert_eq!(rankings.rank(Indicator::Population), 2);
        assert_eq!(rankings.rank(Indicator::GdpGrowthPrimary), 1);
        assert_eq!(rankings.rank(Indicator::GdpGrowthSecondary), 3);
        assert_eq!(rankings.rank(Indicator::CreditRating), 5);
        assert_eq!(rankings.rank(Indicator::NaturalResources), 4);

        let text = transcript(output);
        assert_eq!(text.matches("Invalid input").count(), 2);
        assert_eq!(text.matches("already assigned").count(), 1);
        assert!(text.contains("Rank for real GDP growth 2023: "));
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(""), &mut output);

        let error = prompter
            .ask("Enter the population threshold: ")
            .expect_err("no input left");
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
        assert!(error.to_string().contains("Enter the population threshold"));
    }
}
