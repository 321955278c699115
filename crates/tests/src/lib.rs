
#[cfg(test)]
mod guard_scenario_tests;

#[cfg(test)]
mod session_check_tests;


#[cfg(test)]
mod middleware_tests;

#[cfg(test)]
mod health_tests;
