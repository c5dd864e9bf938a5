mod common;

use common::{cand, d, presidente, vaga};
use distribuidor::algorithm::{apply_all_filters, is_available, RunState};
use distribuidor::models::SkipReason;
use distribuidor::{run_with_rng, RunOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_municipio_de_origen_no_es_no_convocado() {
    let roster = vec![cand("A", "X", "M1"), cand("B", "X", "M2")];
    let slots = vec![vaga(1, d(2025, 6, 2), "M2", "X", 1)];

    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(1));

    assert_eq!(out.called.len(), 1);
    assert_eq!(out.called[0].name, "A");
    assert!(out.not_called.iter().all(|r| r.name != "B"));
    assert!(out.called.iter().all(|r| r.name != "B"));
}

#[test]
fn test_bloqueo_global_en_todas_las_fechas() {
    let mut c = cand("C", "X", "M1");
    c.unavailable = true;
    let roster = vec![c, cand("Z", "X", "M1")];
    let slots = vec![
        vaga(1, d(2025, 6, 2), "M2", "X", 2),
        vaga(2, d(2025, 6, 11), "M3", "X", 2),
        vaga(3, d(2025, 7, 1), "M2", "X", 2),
    ];

    for seed in 0..5 {
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(seed));
        assert!(out.called.iter().all(|r| r.name != "C"));
        assert!(out.not_called.iter().all(|r| r.name != "C"));
        assert_eq!(out.called.len(), 3, "Z cubre las tres vagas");
    }
}

#[test]
fn test_ventana_de_indisponibilidad() {
    let mut dv = cand("D", "X", "M1");
    dv.unavailable_from = Some(d(2025, 6, 1));
    dv.unavailable_until = Some(d(2025, 6, 5));

    assert!(!is_available(&dv, Some(d(2025, 6, 3))));
    assert!(is_available(&dv, Some(d(2025, 6, 6))));

    let roster = vec![dv];
    let slots = vec![
        vaga(1, d(2025, 6, 3), "M2", "X", 1),
        vaga(2, d(2025, 6, 6), "M2", "X", 1),
    ];
    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(3));

    assert_eq!(out.called.len(), 1);
    assert_eq!(out.called[0].weekday_label, "SEXTA");
    assert_eq!(out.report.skipped.len(), 1);
    assert_eq!(out.report.skipped[0].row, 1);
    assert_eq!(out.report.skipped[0].reason, SkipReason::NoEligibleCandidates);
}

#[test]
fn test_misma_semana_mismo_municipio() {
    let roster = vec![cand("E", "X", "M1")];
    // lunes y miércoles: no son días consecutivos, sólo comparten semana
    let slots = vec![
        vaga(1, d(2025, 6, 2), "M2", "X", 1),
        vaga(2, d(2025, 6, 4), "M2", "X", 1),
    ];

    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(4));
    assert_eq!(out.called.len(), 1);
    assert_eq!(out.called[0].weekday_label, "SEGUNDA");

    let mut state = RunState::new(&roster);
    state.record("E", "M2", Some(d(2025, 6, 2)));
    assert!(apply_all_filters(&slots[1], &roster, &state).is_empty());

    // otro municipio la misma semana sigue permitido
    let otro = vaga(3, d(2025, 6, 4), "M3", "X", 1);
    assert_eq!(apply_all_filters(&otro, &roster, &state).len(), 1);
}

#[test]
fn test_semana_siguiente_vuelve_a_ser_elegible() {
    let roster = vec![cand("E", "X", "M1")];
    let slots = vec![
        vaga(1, d(2025, 6, 4), "M2", "X", 1),
        vaga(2, d(2025, 6, 11), "M2", "X", 1),
    ];
    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(5));
    // mismo día de la semana en semanas distintas: el día ya está ocupado para E
    assert_eq!(out.called.len(), 1);

    let slots = vec![
        vaga(1, d(2025, 6, 4), "M2", "X", 1),
        vaga(2, d(2025, 6, 10), "M2", "X", 1),
    ];
    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(5));
    assert_eq!(out.called.len(), 2);
}

#[test]
fn test_dia_anterior_cruza_la_semana() {
    let roster = vec![cand("F", "X", "M1")];
    // domingo 08/06 y lunes 09/06: semanas distintas pero días consecutivos
    let slots = vec![
        vaga(1, d(2025, 6, 8), "M2", "X", 1),
        vaga(2, d(2025, 6, 9), "M2", "X", 1),
    ];
    let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(6));
    assert_eq!(out.called.len(), 1);
    assert_eq!(out.called[0].weekday_label, "DOMINGO");
}

#[test]
fn test_orden_de_entrada_no_se_reordena() {
    let roster = vec![cand("F", "X", "M1")];

    // lunes y luego domingo: el día anterior sólo mira hacia atrás, F va a las dos
    let invertidas = vec![
        vaga(1, d(2025, 6, 9), "M2", "X", 1),
        vaga(2, d(2025, 6, 8), "M2", "X", 1),
    ];
    let out = run_with_rng(&roster, &invertidas, RunOptions::default(), &mut rng(8));
    let dias: Vec<&str> = out.called.iter().map(|r| r.weekday_label.as_str()).collect();
    assert_eq!(dias, vec!["SEGUNDA", "DOMINGO"]);

    // mismas vagas en orden cronológico: el lunes queda bloqueado por el domingo
    let cronologicas = vec![invertidas[1].clone(), invertidas[0].clone()];
    let out = run_with_rng(&roster, &cronologicas, RunOptions::default(), &mut rng(8));
    assert_eq!(out.called.len(), 1);
    assert_eq!(out.called[0].weekday_label, "DOMINGO");
}

#[test]
fn test_menos_convocados_primero() {
    let roster = vec![cand("G", "X", "M1"), cand("H", "X", "M1")];
    let slots = vec![
        vaga(1, d(2025, 6, 2), "M2", "X", 1),
        vaga(2, d(2025, 6, 3), "M3", "X", 1),
        vaga(3, d(2025, 6, 4), "M4", "X", 1),
        vaga(4, d(2025, 6, 5), "M5", "X", 1),
    ];

    for seed in 0..10 {
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(seed));
        assert_eq!(out.called.len(), 4);
        assert_eq!(out.report.convocations["G"], 2);
        assert_eq!(out.report.convocations["H"], 2);
    }
}

#[test]
fn test_presidente_sin_reutilizar() {
    let roster = vec![presidente("P", "X", "M1"), cand("Q", "X", "M1")];
    let slots = vec![
        vaga(1, d(2025, 6, 2), "M2", "X", 2),
        vaga(2, d(2025, 6, 3), "M3", "X", 2),
    ];

    let out = run_with_rng(&roster, &slots, RunOptions { president_reuse: true }, &mut rng(7));
    assert_eq!(out.called.iter().filter(|r| r.is_president).count(), 2);

    let out = run_with_rng(&roster, &slots, RunOptions { president_reuse: false }, &mut rng(7));
    let presidentes: Vec<_> = out.called.iter().filter(|r| r.is_president).collect();
    assert_eq!(presidentes.len(), 1);
    assert_eq!(presidentes[0].name, "P");
    assert_eq!(presidentes[0].weekday_label, "SEGUNDA");
}

#[test]
fn test_misma_semilla_mismo_resultado() {
    let roster: Vec<_> = (0..8).map(|i| cand(&format!("N{i}"), "X", "M1")).collect();
    let slots = vec![
        vaga(1, d(2025, 6, 2), "M2", "X", 3),
        vaga(2, d(2025, 6, 3), "M3", "X", 3),
    ];

    let a = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(99));
    let b = run_with_rng(&roster, &slots, RunOptions::default(), &mut rng(99));
    assert_eq!(a, b);
}
