use chrono::NaiveDate;

use crate::models::Candidate;

/// Verifica si la persona está disponible en la fecha de la vaga.
///
/// - Sin fecha en la vaga no hay restricción de fecha.
/// - `unavailable` bloquea todas las fechas.
/// - Con inicio y fin presentes, bloquea el intervalo cerrado `[inicio, fin]`.
///   Si falta alguno de los dos (o no se pudo leer) la persona queda disponible.
pub fn is_available(candidate: &Candidate, date: Option<NaiveDate>) -> bool {
    let Some(date) = date else {
        return true;
    };

    if candidate.unavailable {
        return false;
    }

    match (candidate.unavailable_from, candidate.unavailable_until) {
        (Some(inicio), Some(fin)) => !(inicio <= date && date <= fin),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, day)
    }

    fn candidate() -> Candidate {
        Candidate {
            name: "Davi".into(),
            categories: "X".into(),
            home_municipality: "RIO".into(),
            unavailable: false,
            unavailable_from: d(1),
            unavailable_until: d(5),
            can_preside: false,
        }
    }

    #[test]
    fn window_is_inclusive() {
        let c = candidate();
        assert!(!is_available(&c, d(1)));
        assert!(!is_available(&c, d(3)));
        assert!(!is_available(&c, d(5)));
        assert!(is_available(&c, d(6)));
    }

    #[test]
    fn no_slot_date_means_available() {
        let mut c = candidate();
        c.unavailable = true;
        assert!(is_available(&c, None));
    }

    #[test]
    fn blanket_flag_ignores_window() {
        let mut c = candidate();
        c.unavailable = true;
        c.unavailable_from = None;
        c.unavailable_until = None;
        assert!(!is_available(&c, d(20)));
    }

    #[test]
    fn half_open_window_fails_open() {
        let mut c = candidate();
        c.unavailable_until = None;
        assert!(is_available(&c, d(3)));
    }
}
