use cb_engine::{Balancer, BalancerConfig, ScoreCalculator, StrategyKind};
use cb_types::{PlayerRecord, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("CustomBalance basic usage");

    let roster = vec![
        PlayerRecord::new("Faker")
            .with_record(20, 14, 6)
            .with_kda(4.2)
            .with_damage(32_000.0, 21_000.0)
            .with_healing(3_000.0)
            .with_cc_score(8.0)
            .with_performance_score(6.1),
        PlayerRecord::new("Keria")
            .with_record(18, 11, 7)
            .with_kda(5.0)
            .with_damage(14_000.0, 17_000.0)
            .with_healing(12_000.0)
            .with_cc_score(25.0)
            .with_performance_score(5.4),
        PlayerRecord::new("Zeus")
            .with_record(15, 7, 8)
            .with_kda(2.8)
            .with_damage(27_000.0, 34_000.0)
            .with_healing(6_500.0)
            .with_cc_score(12.0)
            .with_performance_score(4.9),
        PlayerRecord::new("Newcomer"),
        PlayerRecord::new("Oner")
            .with_record(12, 5, 7)
            .with_kda(3.1)
            .with_damage(19_000.0, 29_000.0)
            .with_healing(8_000.0)
            .with_cc_score(18.0),
    ];

    for record in &roster {
        println!("{:<10} score {:>6.2}", record.id, ScoreCalculator::score(record));
    }

    for strategy in [StrategyKind::Exhaustive, StrategyKind::AlternatingDraft] {
        let balancer = Balancer::new(BalancerConfig::default().with_strategy(strategy));
        let outcome = balancer.balance(&roster)?;

        println!("\n{} (diff {:.2})", outcome.diagnostics.strategy, outcome.score_diff);
        for side in [Side::TeamA, Side::TeamB] {
            let names: Vec<&str> = outcome.team(side).iter().map(|p| p.id()).collect();
            println!("  Team {side}: {}", names.join(", "));
        }
        println!(
            "  {} candidates, {} swaps",
            outcome.diagnostics.candidates_evaluated, outcome.diagnostics.swaps_committed
        );
    }

    Ok(())
}
