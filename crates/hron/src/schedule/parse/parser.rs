//! Recursive-descent parser.
//!
//! One production per grammar rule, one token of lookahead, no backtracking.
//! Calendar validity (real ISO dates, day-of-month bounds) is checked here so
//! the evaluator never sees an impossible date.

use chrono::NaiveDate;

use super::lexer::tokenize;
use super::token::{Token, TokenKind, ordinal_suffix};
use crate::error::{ScheduleError, ScheduleResult, Span};
use crate::schedule::core::{
    DateSpec, DayFilter, DayOfMonthSpec, Exception, IntervalUnit, MonthName, MonthTarget,
    NearestDirection, OrdinalPosition, Schedule, ScheduleExpr, TimeOfDay, UntilSpec, Weekday,
    YearTarget,
};

/// Parses a schedule expression.
///
/// ## Errors
///
/// Returns `ScheduleError::Lex` if tokenization fails, and
/// `ScheduleError::Parse` if the token stream does not match the grammar or
/// names an impossible date.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ScheduleResult<Schedule> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ScheduleError::parse("empty expression", Span::at(0), input));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        input,
    };
    let schedule = parser.parse_expression()?;

    if parser.peek().is_some() {
        return Err(parser.error("unexpected tokens after expression", parser.current_span()));
    }

    tracing::debug!(kind = expr_name(&schedule.expr), "Parsed schedule");
    Ok(schedule)
}

const fn expr_name(expr: &ScheduleExpr) -> &'static str {
    match expr {
        ScheduleExpr::IntervalRepeat { .. } => "interval",
        ScheduleExpr::DayRepeat { .. } => "day",
        ScheduleExpr::WeekRepeat { .. } => "week",
        ScheduleExpr::MonthRepeat { .. } => "month",
        ScheduleExpr::OrdinalRepeat { .. } => "ordinal",
        ScheduleExpr::SingleDate { .. } => "single",
        ScheduleExpr::YearRepeat { .. } => "year",
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    input: &'a str,
}

impl Parser<'_> {
    // ---- token plumbing ----

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Span of the next token, or a zero-width span at end of input.
    fn current_span(&self) -> Span {
        if let Some(tok) = self.tokens.get(self.pos) {
            return tok.span;
        }
        self.tokens
            .last()
            .map_or(Span::at(0), |last| Span::at(last.span.end))
    }

    fn error(&self, message: impl Into<String>, span: Span) -> ScheduleError {
        ScheduleError::parse(message, span, self.input)
    }

    /// `expected X, got Y` at the current token, or `expected X` at end of input.
    fn expected(&self, what: &str) -> ScheduleError {
        let span = self.current_span();
        match self.peek() {
            Some(kind) => self.error(format!("expected {what}, got {kind}"), span),
            None => self.error(format!("expected {what}"), span),
        }
    }

    /// Like [`Self::expected`], but keeps a fixed message regardless of what
    /// was found.
    fn fail(&self, message: &str) -> ScheduleError {
        self.error(message, self.current_span())
    }

    fn consume(&mut self, what: &str, kind: &TokenKind) -> ScheduleResult<()> {
        if self.peek() == Some(kind) {
            self.bump();
            Ok(())
        } else {
            Err(self.expected(what))
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    // ---- top level ----

    fn parse_expression(&mut self) -> ScheduleResult<Schedule> {
        let expr = match self.peek() {
            Some(TokenKind::Every) => {
                self.bump();
                self.parse_every()?
            }
            Some(TokenKind::On) => {
                self.bump();
                self.parse_on()?
            }
            Some(TokenKind::Ordinal(_) | TokenKind::Last) => self.parse_ordinal_repeat()?,
            _ => return Err(self.fail("expected 'every', 'on', or an ordinal (first, second, ...)")),
        };

        self.parse_trailing_clauses(expr)
    }

    fn parse_trailing_clauses(&mut self, expr: ScheduleExpr) -> ScheduleResult<Schedule> {
        let mut schedule = Schedule::new(expr);

        if self.eat(&TokenKind::Except) {
            schedule.except.push(self.parse_exception()?);
            while self.eat(&TokenKind::Comma) {
                schedule.except.push(self.parse_exception()?);
            }
        }

        if self.eat(&TokenKind::Until) {
            schedule.until = Some(self.parse_until()?);
        }

        if self.eat(&TokenKind::Starting) {
            let Some(TokenKind::IsoDate(text)) = self.peek() else {
                return Err(self.fail("expected ISO date (YYYY-MM-DD) after 'starting'"));
            };
            let date = self.iso_date(text)?;
            self.bump();
            schedule.anchor = Some(date);
        }

        if self.eat(&TokenKind::During) {
            schedule.during = self.parse_month_list()?;
        }

        if self.eat(&TokenKind::In) {
            let Some(TokenKind::Timezone(tz)) = self.peek() else {
                return Err(self.fail("expected timezone after 'in'"));
            };
            schedule.timezone = Some(tz.clone());
            self.bump();
        }

        Ok(schedule)
    }

    fn parse_exception(&mut self) -> ScheduleResult<Exception> {
        match self.peek() {
            None => Err(self.fail("expected exception date")),
            Some(TokenKind::IsoDate(text)) => {
                let date = self.iso_date(text)?;
                self.bump();
                Ok(Exception::Iso(date))
            }
            Some(TokenKind::MonthName(month)) => {
                let month = *month;
                self.bump();
                let day =
                    self.parse_day_number(month, "expected day number after month name in exception")?;
                Ok(Exception::Named { month, day })
            }
            Some(_) => Err(self.fail("expected ISO date or month-day in exception")),
        }
    }

    fn parse_until(&mut self) -> ScheduleResult<UntilSpec> {
        match self.peek() {
            None => Err(self.fail("expected until date")),
            Some(TokenKind::IsoDate(text)) => {
                let date = self.iso_date(text)?;
                self.bump();
                Ok(UntilSpec::Iso(date))
            }
            Some(TokenKind::MonthName(month)) => {
                let month = *month;
                self.bump();
                let day =
                    self.parse_day_number(month, "expected day number after month name in until")?;
                Ok(UntilSpec::Named { month, day })
            }
            Some(_) => Err(self.fail("expected ISO date or month-day after 'until'")),
        }
    }

    // ---- every ... ----

    fn parse_every(&mut self) -> ScheduleResult<ScheduleExpr> {
        match self.peek() {
            None => Err(self.fail("expected repeater")),
            Some(TokenKind::Year) => {
                self.bump();
                self.parse_year_repeat(1)
            }
            Some(TokenKind::Day) => self.parse_day_repeat(1, DayFilter::Every),
            Some(TokenKind::Weekday) => {
                self.bump();
                self.parse_day_repeat(1, DayFilter::Weekday)
            }
            Some(TokenKind::Weekend) => {
                self.bump();
                self.parse_day_repeat(1, DayFilter::Weekend)
            }
            Some(TokenKind::DayName(_)) => {
                let days = self.parse_day_list()?;
                self.parse_day_repeat(1, DayFilter::Days(days))
            }
            Some(TokenKind::Month) => {
                self.bump();
                self.parse_month_repeat(1)
            }
            Some(TokenKind::Number(_)) => self.parse_number_repeat(),
            Some(TokenKind::IntervalUnit(_)) => self.parse_interval_repeat(1),
            Some(_) => Err(self.fail(
                "expected day, weekday, weekend, year, day name, month, or number after 'every'",
            )),
        }
    }

    fn parse_day_repeat(&mut self, interval: u32, days: DayFilter) -> ScheduleResult<ScheduleExpr> {
        if days == DayFilter::Every {
            self.consume("'day'", &TokenKind::Day)?;
        }
        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;
        Ok(ScheduleExpr::DayRepeat {
            interval,
            days,
            times,
        })
    }

    fn parse_number_repeat(&mut self) -> ScheduleResult<ScheduleExpr> {
        let Some(TokenKind::Number(interval)) = self.peek() else {
            return Err(self.expected("number"));
        };
        let interval = *interval;
        if interval == 0 {
            return Err(self.fail("interval must be at least 1"));
        }
        self.bump();

        match self.peek() {
            Some(TokenKind::Weeks) => {
                self.bump();
                self.parse_week_repeat(interval)
            }
            Some(TokenKind::IntervalUnit(_)) => self.parse_interval_repeat(interval),
            Some(TokenKind::Day) => self.parse_day_repeat(interval, DayFilter::Every),
            Some(TokenKind::Month) => {
                self.bump();
                self.parse_month_repeat(interval)
            }
            Some(TokenKind::Year) => {
                self.bump();
                self.parse_year_repeat(interval)
            }
            _ => Err(self.fail(
                "expected 'weeks', 'min', 'minutes', 'hour', 'hours', 'day(s)', 'month(s)', or 'year(s)' after number",
            )),
        }
    }

    fn parse_interval_repeat(&mut self, interval: u32) -> ScheduleResult<ScheduleExpr> {
        let Some(TokenKind::IntervalUnit(unit)) = self.peek() else {
            return Err(self.expected("'min' or 'hours'"));
        };
        let unit: IntervalUnit = *unit;
        self.bump();

        self.consume("'from'", &TokenKind::From)?;
        let from = self.parse_time()?;
        self.consume("'to'", &TokenKind::To)?;
        let to = self.parse_time()?;

        let day_filter = if self.eat(&TokenKind::On) {
            Some(self.parse_day_target()?)
        } else {
            None
        };

        Ok(ScheduleExpr::IntervalRepeat {
            interval,
            unit,
            from,
            to,
            day_filter,
        })
    }

    fn parse_week_repeat(&mut self, interval: u32) -> ScheduleResult<ScheduleExpr> {
        self.consume("'on'", &TokenKind::On)?;
        let days = self.parse_day_list()?;
        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;
        Ok(ScheduleExpr::WeekRepeat {
            interval,
            days,
            times,
        })
    }

    fn parse_month_repeat(&mut self, interval: u32) -> ScheduleResult<ScheduleExpr> {
        self.consume("'on'", &TokenKind::On)?;
        self.consume("'the'", &TokenKind::The)?;

        let target = match self.peek() {
            Some(TokenKind::Last) => {
                self.bump();
                match self.peek() {
                    Some(TokenKind::Day) => {
                        self.bump();
                        MonthTarget::LastDay
                    }
                    Some(TokenKind::Weekday) => {
                        self.bump();
                        MonthTarget::LastWeekday
                    }
                    Some(TokenKind::DayName(weekday)) => {
                        let weekday = *weekday;
                        self.bump();
                        MonthTarget::OrdinalWeekday {
                            ordinal: OrdinalPosition::Last,
                            weekday,
                        }
                    }
                    _ => return Err(self.fail("expected 'day' or 'weekday' after 'last'")),
                }
            }
            Some(TokenKind::Ordinal(ordinal)) => {
                let ordinal = *ordinal;
                self.bump();
                let weekday = self.parse_day_name("expected day name after ordinal")?;
                MonthTarget::OrdinalWeekday { ordinal, weekday }
            }
            Some(TokenKind::OrdinalNumber(_) | TokenKind::Number(_)) => {
                MonthTarget::Days(self.parse_ordinal_day_list()?)
            }
            Some(TokenKind::Next | TokenKind::Previous | TokenKind::Nearest) => {
                self.parse_nearest_weekday_target()?
            }
            _ => {
                return Err(self.fail(
                    "expected ordinal day (1st, 15th), 'last', or '[next|previous] nearest' after 'the'",
                ));
            }
        };

        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;
        Ok(ScheduleExpr::MonthRepeat {
            interval,
            target,
            times,
        })
    }

    fn parse_nearest_weekday_target(&mut self) -> ScheduleResult<MonthTarget> {
        let direction = match self.peek() {
            Some(TokenKind::Next) => {
                self.bump();
                Some(NearestDirection::Next)
            }
            Some(TokenKind::Previous) => {
                self.bump();
                Some(NearestDirection::Previous)
            }
            _ => None,
        };

        self.consume("'nearest'", &TokenKind::Nearest)?;
        self.consume("'weekday'", &TokenKind::Weekday)?;
        self.consume("'to'", &TokenKind::To)?;
        let day = self.parse_ordinal_day("expected ordinal day number")?;

        Ok(MonthTarget::NearestWeekday { day, direction })
    }

    /// `<ordinal|last> <day> of every [N] month(s) at <times>`
    fn parse_ordinal_repeat(&mut self) -> ScheduleResult<ScheduleExpr> {
        let ordinal = self.parse_ordinal_position()?;
        let weekday = self.parse_day_name("expected day name after ordinal")?;

        self.consume("'of'", &TokenKind::Of)?;
        self.consume("'every'", &TokenKind::Every)?;

        let mut interval = 1;
        if let Some(TokenKind::Number(n)) = self.peek() {
            if *n == 0 {
                return Err(self.fail("interval must be at least 1"));
            }
            interval = *n;
            self.bump();
        }

        self.consume("'month'", &TokenKind::Month)?;
        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;

        Ok(ScheduleExpr::OrdinalRepeat {
            interval,
            ordinal,
            weekday,
            times,
        })
    }

    fn parse_year_repeat(&mut self, interval: u32) -> ScheduleResult<ScheduleExpr> {
        self.consume("'on'", &TokenKind::On)?;

        let target = match self.peek() {
            Some(TokenKind::The) => {
                self.bump();
                self.parse_year_target_after_the()?
            }
            Some(TokenKind::MonthName(month)) => {
                let month = *month;
                self.bump();
                let day = self.parse_day_number(month, "expected day number after month name")?;
                YearTarget::Date { month, day }
            }
            _ => return Err(self.fail("expected month name or 'the' after 'every year on'")),
        };

        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;
        Ok(ScheduleExpr::YearRepeat {
            interval,
            target,
            times,
        })
    }

    fn parse_year_target_after_the(&mut self) -> ScheduleResult<YearTarget> {
        match self.peek() {
            Some(TokenKind::Last) => {
                self.bump();
                match self.peek() {
                    Some(TokenKind::Weekday) => {
                        self.bump();
                        self.consume("'of'", &TokenKind::Of)?;
                        let month = self.parse_month_name()?;
                        Ok(YearTarget::LastWeekday { month })
                    }
                    Some(TokenKind::DayName(weekday)) => {
                        let weekday = *weekday;
                        self.bump();
                        self.consume("'of'", &TokenKind::Of)?;
                        let month = self.parse_month_name()?;
                        Ok(YearTarget::OrdinalWeekday {
                            ordinal: OrdinalPosition::Last,
                            weekday,
                            month,
                        })
                    }
                    _ => Err(self.fail("expected 'weekday' or day name after 'last' in yearly expression")),
                }
            }
            Some(TokenKind::Ordinal(ordinal)) => {
                let ordinal = *ordinal;
                self.bump();
                let weekday =
                    self.parse_day_name("expected day name after ordinal in yearly expression")?;
                self.consume("'of'", &TokenKind::Of)?;
                let month = self.parse_month_name()?;
                Ok(YearTarget::OrdinalWeekday {
                    ordinal,
                    weekday,
                    month,
                })
            }
            Some(TokenKind::OrdinalNumber(_) | TokenKind::Number(_)) => {
                let span = self.current_span();
                let day = self.parse_ordinal_day(
                    "expected ordinal, day number, or 'last' after 'the' in yearly expression",
                )?;
                self.consume("'of'", &TokenKind::Of)?;
                let month = self.parse_month_name()?;
                if day > month.max_days() {
                    return Err(self.error(
                        format!("invalid day {day} for {}", month.full_name()),
                        span,
                    ));
                }
                Ok(YearTarget::DayOfMonth { day, month })
            }
            _ => Err(self.fail(
                "expected ordinal, day number, or 'last' after 'the' in yearly expression",
            )),
        }
    }

    // ---- on ... ----

    fn parse_on(&mut self) -> ScheduleResult<ScheduleExpr> {
        let date = self.parse_date_target()?;
        self.consume("'at'", &TokenKind::At)?;
        let times = self.parse_time_list()?;
        Ok(ScheduleExpr::SingleDate { date, times })
    }

    fn parse_date_target(&mut self) -> ScheduleResult<DateSpec> {
        match self.peek() {
            None => Err(self.fail("expected date")),
            Some(TokenKind::IsoDate(text)) => {
                let date = self.iso_date(text)?;
                self.bump();
                Ok(DateSpec::Iso(date))
            }
            Some(TokenKind::MonthName(month)) => {
                let month = *month;
                self.bump();
                let day = self.parse_day_number(month, "expected day number after month name")?;
                Ok(DateSpec::Named { month, day })
            }
            Some(_) => Err(self.fail("expected date (ISO date or month name)")),
        }
    }

    // ---- shared pieces ----

    fn parse_ordinal_position(&mut self) -> ScheduleResult<OrdinalPosition> {
        let ordinal = match self.peek() {
            Some(TokenKind::Ordinal(ordinal)) => *ordinal,
            Some(TokenKind::Last) => OrdinalPosition::Last,
            _ => {
                return Err(
                    self.fail("expected ordinal (first, second, third, fourth, fifth, last)")
                );
            }
        };
        self.bump();
        Ok(ordinal)
    }

    fn parse_day_target(&mut self) -> ScheduleResult<DayFilter> {
        match self.peek() {
            Some(TokenKind::Day) => {
                self.bump();
                Ok(DayFilter::Every)
            }
            Some(TokenKind::Weekday) => {
                self.bump();
                Ok(DayFilter::Weekday)
            }
            Some(TokenKind::Weekend) => {
                self.bump();
                Ok(DayFilter::Weekend)
            }
            Some(TokenKind::DayName(_)) => Ok(DayFilter::Days(self.parse_day_list()?)),
            _ => Err(self.fail("expected 'day', 'weekday', 'weekend', or day name")),
        }
    }

    fn parse_day_name(&mut self, message: &str) -> ScheduleResult<Weekday> {
        let Some(TokenKind::DayName(day)) = self.peek() else {
            return Err(self.fail(message));
        };
        let day = *day;
        self.bump();
        Ok(day)
    }

    fn parse_day_list(&mut self) -> ScheduleResult<Vec<Weekday>> {
        let mut days = vec![self.parse_day_name("expected day name")?];
        while self.eat(&TokenKind::Comma) {
            days.push(self.parse_day_name("expected day name after ','")?);
        }
        Ok(days)
    }

    fn parse_month_name(&mut self) -> ScheduleResult<MonthName> {
        let Some(TokenKind::MonthName(month)) = self.peek() else {
            return Err(self.fail("expected month name"));
        };
        let month = *month;
        self.bump();
        Ok(month)
    }

    fn parse_month_list(&mut self) -> ScheduleResult<Vec<MonthName>> {
        let mut months = vec![self.parse_month_name()?];
        while self.eat(&TokenKind::Comma) {
            months.push(self.parse_month_name()?);
        }
        Ok(months)
    }

    fn parse_ordinal_day_list(&mut self) -> ScheduleResult<Vec<DayOfMonthSpec>> {
        let mut specs = vec![self.parse_ordinal_day_spec()?];
        while self.eat(&TokenKind::Comma) {
            specs.push(self.parse_ordinal_day_spec()?);
        }
        Ok(specs)
    }

    fn parse_ordinal_day_spec(&mut self) -> ScheduleResult<DayOfMonthSpec> {
        let start_span = self.current_span();
        let start = self.parse_ordinal_day("expected ordinal day number")?;

        if !self.eat(&TokenKind::To) {
            return Ok(DayOfMonthSpec::Single(start));
        }

        let end_span = self.current_span();
        let end = self.parse_ordinal_day("expected ordinal day number after 'to'")?;
        if start > end {
            return Err(self.error(
                format!(
                    "invalid day range: {start}{} is after {end}{}",
                    ordinal_suffix(start),
                    ordinal_suffix(end)
                ),
                Span::new(start_span.start, end_span.end),
            ));
        }
        Ok(DayOfMonthSpec::Range(start, end))
    }

    /// An ordinal day of month (`1st` .. `31st`). A bare number is rejected
    /// with the ordinal spelling as a suggestion.
    fn parse_ordinal_day(&mut self, message: &str) -> ScheduleResult<u32> {
        let span = self.current_span();
        let day = match self.peek() {
            Some(TokenKind::OrdinalNumber(n)) => *n,
            Some(TokenKind::Number(n)) => {
                let fix = format!("{n}{}", ordinal_suffix(*n));
                return Err(self.error(message, span).with_suggestion(fix));
            }
            _ => return Err(self.error(message, span)),
        };
        if !(1..=31).contains(&day) {
            return Err(self.error(format!("invalid day of month: {day}"), span));
        }
        self.bump();
        Ok(day)
    }

    /// Day number after a month name; plain or ordinal, bounded by the month.
    fn parse_day_number(&mut self, month: MonthName, message: &str) -> ScheduleResult<u32> {
        let span = self.current_span();
        let day = match self.peek() {
            Some(TokenKind::Number(n) | TokenKind::OrdinalNumber(n)) => *n,
            _ => return Err(self.error(message, span)),
        };
        if day == 0 || day > month.max_days() {
            return Err(self.error(
                format!("invalid day {day} for {}", month.full_name()),
                span,
            ));
        }
        self.bump();
        Ok(day)
    }

    fn parse_time_list(&mut self) -> ScheduleResult<Vec<TimeOfDay>> {
        let mut times = vec![self.parse_time()?];
        while self.eat(&TokenKind::Comma) {
            times.push(self.parse_time()?);
        }
        Ok(times)
    }

    fn parse_time(&mut self) -> ScheduleResult<TimeOfDay> {
        let Some(TokenKind::Time(time)) = self.peek() else {
            return Err(self.fail("expected time (HH:MM)"));
        };
        let time = *time;
        self.bump();
        Ok(time)
    }

    fn iso_date(&self, text: &str) -> ScheduleResult<NaiveDate> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_err| self.error(format!("invalid date: {text}"), self.current_span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> Schedule {
        parse(input).expect("should parse")
    }

    fn parse_err(input: &str) -> ScheduleError {
        parse(input).expect_err("should fail")
    }

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_parse_every_day() {
        let s = parse_ok("every day at 09:00");
        assert_eq!(
            s.expr,
            ScheduleExpr::DayRepeat {
                interval: 1,
                days: DayFilter::Every,
                times: vec![t(9, 0)],
            }
        );
        assert_eq!(s, Schedule::new(s.expr.clone()));
    }

    #[test]
    fn test_parse_day_lists_and_filters() {
        let s = parse_ok("every weekend at 10:00, 16:30");
        assert_eq!(
            s.expr,
            ScheduleExpr::DayRepeat {
                interval: 1,
                days: DayFilter::Weekend,
                times: vec![t(10, 0), t(16, 30)],
            }
        );

        let s = parse_ok("every mon, wed, fri at 9:00");
        assert_eq!(
            s.expr,
            ScheduleExpr::DayRepeat {
                interval: 1,
                days: DayFilter::Days(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]),
                times: vec![t(9, 0)],
            }
        );
    }

    #[test]
    fn test_parse_number_repeats() {
        assert_eq!(
            parse_ok("every 3 days at 09:00").expr,
            ScheduleExpr::DayRepeat {
                interval: 3,
                days: DayFilter::Every,
                times: vec![t(9, 0)],
            }
        );
        assert_eq!(
            parse_ok("every 2 weeks on monday, friday at 08:00").expr,
            ScheduleExpr::WeekRepeat {
                interval: 2,
                days: vec![Weekday::Monday, Weekday::Friday],
                times: vec![t(8, 0)],
            }
        );
        assert_eq!(
            parse_ok("every 30 min from 09:00 to 17:00 on weekday").expr,
            ScheduleExpr::IntervalRepeat {
                interval: 30,
                unit: IntervalUnit::Minutes,
                from: t(9, 0),
                to: t(17, 0),
                day_filter: Some(DayFilter::Weekday),
            }
        );
    }

    #[test]
    fn test_parse_month_targets() {
        let s = parse_ok("every month on the 1st to 5th, 15th at 10:00");
        assert_eq!(
            s.expr,
            ScheduleExpr::MonthRepeat {
                interval: 1,
                target: MonthTarget::Days(vec![
                    DayOfMonthSpec::Range(1, 5),
                    DayOfMonthSpec::Single(15),
                ]),
                times: vec![t(10, 0)],
            }
        );

        let ScheduleExpr::MonthRepeat { target, interval, .. } =
            parse_ok("every 2 months on the last weekday at 17:00").expr
        else {
            panic!("should be a month repeat");
        };
        assert_eq!(interval, 2);
        assert_eq!(target, MonthTarget::LastWeekday);

        let ScheduleExpr::MonthRepeat { target, .. } =
            parse_ok("every month on the next nearest weekday to 15th at 09:00").expr
        else {
            panic!("should be a month repeat");
        };
        assert_eq!(
            target,
            MonthTarget::NearestWeekday {
                day: 15,
                direction: Some(NearestDirection::Next),
            }
        );

        let ScheduleExpr::MonthRepeat { target, .. } =
            parse_ok("every month on the last friday at 09:00").expr
        else {
            panic!("should be a month repeat");
        };
        assert_eq!(
            target,
            MonthTarget::OrdinalWeekday {
                ordinal: OrdinalPosition::Last,
                weekday: Weekday::Friday,
            }
        );
    }

    #[test]
    fn test_parse_ordinal_repeat() {
        assert_eq!(
            parse_ok("last friday of every 3 months at 18:00").expr,
            ScheduleExpr::OrdinalRepeat {
                interval: 3,
                ordinal: OrdinalPosition::Last,
                weekday: Weekday::Friday,
                times: vec![t(18, 0)],
            }
        );
    }

    #[test]
    fn test_parse_year_targets() {
        assert_eq!(
            parse_ok("every year on dec 25 at 00:00").expr,
            ScheduleExpr::YearRepeat {
                interval: 1,
                target: YearTarget::Date {
                    month: MonthName::December,
                    day: 25,
                },
                times: vec![t(0, 0)],
            }
        );
        let ScheduleExpr::YearRepeat { target, .. } =
            parse_ok("every year on the first monday of march at 10:00").expr
        else {
            panic!("should be a year repeat");
        };
        assert_eq!(
            target,
            YearTarget::OrdinalWeekday {
                ordinal: OrdinalPosition::First,
                weekday: Weekday::Monday,
                month: MonthName::March,
            }
        );
        let ScheduleExpr::YearRepeat { target, .. } =
            parse_ok("every 2 years on the 15th of june at 10:00").expr
        else {
            panic!("should be a year repeat");
        };
        assert_eq!(
            target,
            YearTarget::DayOfMonth {
                day: 15,
                month: MonthName::June,
            }
        );
    }

    #[test]
    fn test_parse_single_dates() {
        assert_eq!(
            parse_ok("on 2026-03-15 at 14:30").expr,
            ScheduleExpr::SingleDate {
                date: DateSpec::Iso(date(2026, 3, 15)),
                times: vec![t(14, 30)],
            }
        );
        assert_eq!(
            parse_ok("on feb 29 at 09:00").expr,
            ScheduleExpr::SingleDate {
                date: DateSpec::Named {
                    month: MonthName::February,
                    day: 29,
                },
                times: vec![t(9, 0)],
            }
        );
    }

    #[test]
    fn test_parse_trailing_clauses() {
        let s = parse_ok(
            "every weekday at 09:00 except dec 25, 2026-01-01 until 2026-12-31 starting 2026-01-05 during jan, feb in America/New_York",
        );
        assert_eq!(
            s.except,
            vec![
                Exception::Named {
                    month: MonthName::December,
                    day: 25,
                },
                Exception::Iso(date(2026, 1, 1)),
            ]
        );
        assert_eq!(s.until, Some(UntilSpec::Iso(date(2026, 12, 31))));
        assert_eq!(s.anchor, Some(date(2026, 1, 5)));
        assert_eq!(s.during, vec![MonthName::January, MonthName::February]);
        assert_eq!(s.timezone.as_deref(), Some("America/New_York"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_err("").message(), "empty expression");
        assert_eq!(parse_err("   ").message(), "empty expression");
        assert_eq!(parse_err("every 0 days at 09:00").message(), "interval must be at least 1");
        assert_eq!(
            parse_err("at 09:00").message(),
            "expected 'every', 'on', or an ordinal (first, second, ...)"
        );
        assert_eq!(
            parse_err("every day at 09:00 every").message(),
            "unexpected tokens after expression"
        );
        assert_eq!(parse_err("every day 09:00").message(), "expected 'at', got '09:00'");
    }

    #[test]
    fn test_parse_error_at_end_is_zero_width() {
        let err = parse_err("every day at");
        assert_eq!(err.message(), "expected time (HH:MM)");
        assert_eq!(err.span(), Some(Span::at(12)));
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_err("on 2026-02-30 at 09:00").message(), "invalid date: 2026-02-30");
        assert_eq!(parse_err("on feb 30 at 09:00").message(), "invalid day 30 for february");
        assert_eq!(
            parse_err("every month on the 32nd at 09:00").message(),
            "invalid day of month: 32"
        );
        assert_eq!(
            parse_err("every month on the 20th to 5th at 09:00").message(),
            "invalid day range: 20th is after 5th"
        );
    }

    #[test]
    fn test_parse_bare_number_suggests_ordinal() {
        let err = parse_err("every month on the 15 at 09:00");
        assert_eq!(err.message(), "expected ordinal day number");
        assert_eq!(err.suggestion(), Some("15th"));
        assert_eq!(err.span(), Some(Span::new(19, 21)));
    }

    #[test]
    fn test_parse_missing_timezone_is_lex_error() {
        let err = parse_err("every day at 09:00 in");
        assert_eq!(err.kind(), crate::error::ErrorKind::Lex);
    }
}
