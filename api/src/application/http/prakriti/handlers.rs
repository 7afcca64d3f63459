pub mod assess_prakriti;
